use anyhow::{Result, bail};
use filtertable_filter::{FilterConfig, QuickModifiers, compose_query};

pub fn run(
    config: &FilterConfig,
    current: &str,
    label: &str,
    modifiers: QuickModifiers,
) -> Result<()> {
    let Some(item) = config.quick_item(label) else {
        let labels: Vec<&str> = config.quick_list.iter().map(|item| item.label.as_str()).collect();
        if labels.is_empty() {
            bail!("Unknown quick list entry `{label}`; no `quick` entries are configured");
        }
        bail!(
            "Unknown quick list entry `{label}`; expected one of: {}",
            labels.join(", ")
        );
    };

    println!("{}", compose_query(current, &item.phrase, modifiers));
    Ok(())
}
