/// A canned phrase the host can offer next to the filter input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickListItem {
    pub label: String,
    pub phrase: String,
    pub tooltip: Option<String>,
}

impl QuickListItem {
    pub fn new(label: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            phrase: phrase.into(),
            tooltip: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Parses `label | phrase` or `label | phrase | tooltip`.
    pub fn from_config_value(value: &str) -> Option<Self> {
        let (label, rest) = value.split_once('|')?;
        let (phrase, tooltip) = match rest.rsplit_once('|') {
            Some((phrase, tooltip)) => (phrase, tooltip.trim()),
            None => (rest, ""),
        };

        let label = label.trim();
        let phrase = phrase.trim();
        if label.is_empty() || phrase.is_empty() {
            return None;
        }

        Some(Self {
            label: label.to_string(),
            phrase: phrase.to_string(),
            tooltip: (!tooltip.is_empty()).then(|| tooltip.to_string()),
        })
    }

    pub fn to_config_value(&self) -> String {
        match &self.tooltip {
            Some(tooltip) => format!("{} | {} | {}", self.label, self.phrase, tooltip),
            None => format!("{} | {}", self.label, self.phrase),
        }
    }
}

/// Modifier state when a quick list item is picked (alt / shift in most UIs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuickModifiers {
    pub add: bool,
    pub subtract: bool,
}

/// Builds the query that results from picking `phrase` while `current` is in
/// the input field.
///
/// Without modifiers the query is replaced. `add` appends a constrain term,
/// `subtract` an exclude term and both together a global include. The
/// result always ends with a space so the user can keep typing.
pub fn compose_query(current: &str, phrase: &str, modifiers: QuickModifiers) -> String {
    let QuickModifiers { add, subtract } = modifiers;

    let mut base = if add || subtract {
        current.trim().to_string()
    } else {
        String::new()
    };
    let empty = base.is_empty();
    let mut separator = if empty { "" } else { " " }.to_string();

    if add && subtract {
        separator.push('+');
    } else if subtract {
        if empty {
            // An exclude needs visible rows to act on, so start from all rows.
            base.push('.');
            separator.push(' ');
        }
        separator.push('-');
    }

    format!("{base}{separator}{phrase} ")
}
