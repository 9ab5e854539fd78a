use anyhow::{Context, bail};
use comedor_admin::setup_environment;
use serde_json::Value;
use shared::reconcile::reconcile_with_report;

const USAGE: &str = "usage: comedor-admin <menu.json>";

/// Reconcile a stored menu document and print its canonical form.
///
/// Accepts either a bare weekday mapping or a full document with a `days`
/// field; a document keeps its other fields.
fn main() -> anyhow::Result<()> {
    let config = setup_environment()?;
    tracing::debug!(environment = %config.environment, "Environment ready");

    let Some(path) = std::env::args().nth(1) else {
        bail!(USAGE);
    };

    let content =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
    let mut document: Value =
        serde_json::from_str(&content).with_context(|| format!("{path} is not valid JSON"))?;

    let is_document = document.get("days").is_some();
    let days = if is_document {
        &document["days"]
    } else {
        &document
    };

    let reconciled = reconcile_with_report(days).with_context(|| format!("cannot reconcile {path}"))?;
    let report = &reconciled.report;

    for key in &report.dropped_keys {
        tracing::warn!(key = %key, "Dropped entry with unknown day");
    }
    for collision in &report.collisions {
        tracing::warn!(
            day = collision.day.key(),
            replaced = %collision.replaced,
            kept = %collision.kept,
            "Collision, later entry kept"
        );
    }
    tracing::info!(
        path = %path,
        clean = report.is_clean(),
        dropped_keys = report.dropped_keys.len(),
        collisions = report.collisions.len(),
        dropped_items = report.dropped_items,
        "Menu reconciled"
    );

    let canonical = serde_json::to_value(&reconciled.days)?;
    let output = if is_document {
        document["days"] = canonical;
        document
    } else {
        canonical
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
