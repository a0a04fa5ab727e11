//! Login command - validates credentials

use super::CredentialArgs;
use crate::infrastructure::user::prehash_password;

pub async fn run(args: CredentialArgs) -> anyhow::Result<()> {
    let service = super::bootstrap().await?;

    service
        .is_login_valid(&args.email, &prehash_password(&args.password))
        .await?;

    println!("Login valid for {}", args.email);

    Ok(())
}
