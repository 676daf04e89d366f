use league_persistence_sqlite::{accounts::SqliteAccountRepository, create_db_pool};
use league_server_app::domain::{
    RepoRetrieveError,
    account::{AccountRepository, NewAccount},
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 && args.len() != 5 {
        eprintln!("Usage: add_account <username> <email> <password> [<role>]");
        std::process::exit(1);
    }

    let db_path = std::env::var("LEAGUE_DB_PATH").expect("LEAGUE_DB_PATH env var not set");

    let username = &args[1];
    let email = &args[2];
    let password = &args[3];
    let role = if args.len() == 5 { &args[4] } else { "" };

    let pool = create_db_pool(&db_path)
        .await
        .expect("Failed to open database");
    let repo = SqliteAccountRepository::new(pool);

    create_account(&repo, username, email, password, role == "admin").await;
}

async fn create_account(
    repo: &SqliteAccountRepository,
    username: &str,
    email: &str,
    password: &str,
    is_admin: bool,
) {
    match repo.get_account_by_username(username).await {
        Ok(_) => panic!("Account with name [{}] already exists", username),
        Err(RepoRetrieveError::NotFound) => {}
        Err(e) => panic!("Failed to query for existing account: {}", e),
    }

    let pw_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST).expect("Failed to hash password");

    let account = repo
        .create_account(NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: Some(pw_hash),
            first_name: None,
            last_name: None,
            active: true,
            is_admin,
        })
        .await
        .expect("Failed to insert new account");

    println!(
        "Created account [{}] with id {} (admin: {})",
        account.username, account.id, account.is_admin
    );
}
