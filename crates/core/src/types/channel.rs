//! Sales channels and the page-level channel selection.

use serde::{Deserialize, Serialize};

use super::id::ChannelId;

/// A sales channel: a storefront context that scopes inventory queries.
///
/// Immutable once fetched. Selection is keyed by `slug`, not `id` - the
/// slug is what the stock query accepts as its channel argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub slug: String,
    pub name: String,
}

/// The single mutable piece of page state: which channel is selected.
///
/// Starts unset (empty slug). Once the channel list arrives,
/// [`on_channels_loaded`](Self::on_channels_loaded) assigns the first
/// channel's slug - exactly once. A user choice made through
/// [`select`](Self::select) always wins and is never overridden by a
/// later load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSelection {
    // Empty string is the unset sentinel, matching the wire value the
    // selection started from.
    slug: String,
}

impl ChannelSelection {
    /// Create an unset selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected channel slug, or `None` while unset.
    ///
    /// Callers gate the dependent stock query on this returning `Some`.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        if self.slug.is_empty() {
            None
        } else {
            Some(&self.slug)
        }
    }

    /// Apply the default-selection rule for a freshly loaded channel list.
    ///
    /// If no selection exists yet and `channels` is non-empty, selects the
    /// first channel's slug and returns `true`. Idempotent: once any
    /// selection exists (auto- or user-chosen), later calls leave it
    /// untouched and return `false`.
    pub fn on_channels_loaded(&mut self, channels: &[Channel]) -> bool {
        if self.slug.is_empty()
            && let Some(first) = channels.first()
        {
            self.slug = first.slug.clone();
            return true;
        }
        false
    }

    /// User-driven override: always allowed, replaces any prior selection.
    pub fn select(&mut self, slug: impl Into<String>) {
        self.slug = slug.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channels(slugs: &[(&str, &str)]) -> Vec<Channel> {
        slugs
            .iter()
            .enumerate()
            .map(|(i, (slug, name))| Channel {
                id: ChannelId::new(format!("Q2hhbm5lbDo{i}")),
                slug: (*slug).to_string(),
                name: (*name).to_string(),
            })
            .collect()
    }

    #[test]
    fn test_auto_select_picks_first_channel() {
        let mut selection = ChannelSelection::new();
        let loaded = channels(&[("default-channel", "Default"), ("eu", "EU")]);

        assert!(selection.on_channels_loaded(&loaded));
        assert_eq!(selection.selected(), Some("default-channel"));
    }

    #[test]
    fn test_auto_select_runs_exactly_once() {
        let mut selection = ChannelSelection::new();
        assert!(selection.on_channels_loaded(&channels(&[("default-channel", "Default")])));

        // A second load with a different list must not override.
        assert!(!selection.on_channels_loaded(&channels(&[("eu", "EU")])));
        assert_eq!(selection.selected(), Some("default-channel"));
    }

    #[test]
    fn test_empty_list_leaves_selection_unset() {
        let mut selection = ChannelSelection::new();
        assert!(!selection.on_channels_loaded(&[]));
        assert_eq!(selection.selected(), None);

        // Still unset after repeated empty loads.
        assert!(!selection.on_channels_loaded(&[]));
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_user_choice_survives_later_load() {
        let mut selection = ChannelSelection::new();
        selection.select("eu");

        assert!(!selection.on_channels_loaded(&channels(&[("default-channel", "Default")])));
        assert_eq!(selection.selected(), Some("eu"));
    }

    #[test]
    fn test_user_override_replaces_auto_selection() {
        let mut selection = ChannelSelection::new();
        selection.on_channels_loaded(&channels(&[("default-channel", "Default"), ("eu", "EU")]));

        selection.select("eu");
        assert_eq!(selection.selected(), Some("eu"));
    }

    #[test]
    fn test_unset_is_none_not_empty_str() {
        let selection = ChannelSelection::new();
        assert!(selection.selected().is_none());
    }
}
