//! Register command - creates an account

use tracing::info;

use super::CredentialArgs;
use crate::infrastructure::user::prehash_password;

/// Register the account and print its ID
pub async fn run(args: CredentialArgs) -> anyhow::Result<()> {
    let service = super::bootstrap().await?;

    let user = service
        .register_user(&args.email, &prehash_password(&args.password))
        .await?;

    info!(user_id = %user.id(), "Account created");
    println!("Registered {} ({})", user.email(), user.id());

    Ok(())
}
