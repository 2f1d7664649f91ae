//! User command - Identity store management from the shell.

use crate::cli::args::{UserAction, UserArgs};
use crate::config::Config;
use crate::domain::CreateUser;
use crate::errors::AppResult;
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Execute the user command
pub async fn execute(args: UserArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let services = Services::from_connection(db.get_connection());

    match args.action {
        UserAction::Create {
            username,
            email,
            name,
            password,
        } => {
            let user = services
                .users()
                .create_user(CreateUser {
                    username,
                    email,
                    name,
                    password,
                })
                .await?;
            println!("Created user {} ({})", user.username, user.id);
        }
    }

    Ok(())
}
