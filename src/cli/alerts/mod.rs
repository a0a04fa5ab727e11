//! Alerts command - lists a user's alerts

use clap::Args;

use crate::domain::alert::Alert;

/// Arguments for the alerts command
#[derive(Args, Clone)]
pub struct AlertsArgs {
    /// Email of the owning user
    #[arg(long)]
    pub email: String,
}

pub async fn run(args: AlertsArgs) -> anyhow::Result<()> {
    let service = super::bootstrap().await?;

    let user = service.find_by_email(&args.email).await?;
    let alerts = service.get_alerts(&user).await?;

    if alerts.is_empty() {
        println!("No alerts for {}", user.email());
    }

    for alert in &alerts {
        println!("{}", format_alert(alert));
    }

    Ok(())
}

fn format_alert(alert: &Alert) -> String {
    format!(
        "{}  item={}  limit={:.2}  {}  last_checked={}",
        alert.id().as_str(),
        alert.item_id(),
        alert.price_limit(),
        if alert.is_active() { "active" } else { "inactive" },
        alert.last_checked().to_rfc3339(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_alert() {
        let mut alert = Alert::new("jane@example.com", "item-9", 7.5);
        alert.deactivate();

        let line = format_alert(&alert);

        assert!(line.starts_with(alert.id().as_str()));
        assert!(line.contains("item=item-9"));
        assert!(line.contains("limit=7.50"));
        assert!(line.contains("inactive"));
    }
}
