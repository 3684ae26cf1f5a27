use crate::config::EntryConfig;

/// What activating a selectable row does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    /// Ask the playback service for this clip.
    Play(String),
    /// Ask the playback service to stop whatever is playing.
    Stop,
    /// Open the configuration file in an external editor.
    EditConfig,
}

impl EntryAction {
    /// Playback service URL for this action, or `None` for local-only actions.
    pub fn url(&self, base: &str) -> Option<String> {
        let base = base.trim_end_matches('/');
        match self {
            EntryAction::Play(clip) => Some(format!("{base}/{clip}")),
            EntryAction::Stop => Some(format!("{base}/stop")),
            EntryAction::EditConfig => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub icon: String,
    pub action: EntryAction,
}

/// One rendered menu row. Separators carry no action and are never
/// addressable by the selection model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item(MenuItem),
    Separator,
}

/// Build the fixed entry list from configuration, in configuration order.
/// Rows with no clip and no special role are dropped.
pub fn build_entries(configs: &[EntryConfig]) -> Vec<MenuEntry> {
    let mut entries = Vec::with_capacity(configs.len());
    for c in configs {
        if c.separator {
            entries.push(MenuEntry::Separator);
            continue;
        }
        let action = if c.edit {
            EntryAction::EditConfig
        } else if c.stop {
            EntryAction::Stop
        } else if !c.clip.is_empty() {
            EntryAction::Play(c.clip.clone())
        } else {
            continue;
        };
        entries.push(MenuEntry::Item(MenuItem {
            label: c.label.clone(),
            icon: c.icon.clone(),
            action,
        }));
    }
    entries
}

/// The selectable items only, in entry order, for the selection model.
pub fn selectable_items(entries: &[MenuEntry]) -> Vec<MenuItem> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            MenuEntry::Item(item) => Some(item.clone()),
            MenuEntry::Separator => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip_config(label: &str, clip: &str) -> EntryConfig {
        EntryConfig {
            label: label.into(),
            clip: clip.into(),
            ..EntryConfig::default()
        }
    }

    // --- URL construction ---

    #[test]
    fn play_url_appends_clip_to_base() {
        let action = EntryAction::Play("foo.mp3".into());
        assert_eq!(
            action.url("http://host:30001/audio/play"),
            Some("http://host:30001/audio/play/foo.mp3".into())
        );
    }

    #[test]
    fn stop_url_uses_reserved_stop_route() {
        assert_eq!(
            EntryAction::Stop.url("http://host:30001/audio/play"),
            Some("http://host:30001/audio/play/stop".into())
        );
    }

    #[test]
    fn trailing_slash_on_base_is_tolerated() {
        let action = EntryAction::Play("foo.mp3".into());
        assert_eq!(
            action.url("http://host/play/"),
            Some("http://host/play/foo.mp3".into())
        );
    }

    #[test]
    fn edit_action_has_no_url() {
        assert_eq!(EntryAction::EditConfig.url("http://host/play"), None);
    }

    // --- entry construction ---

    #[test]
    fn separators_are_excluded_from_selectable_items() {
        let configs = vec![
            clip_config("A", "a.mp3"),
            EntryConfig {
                separator: true,
                ..EntryConfig::default()
            },
            clip_config("B", "b.mp3"),
        ];
        let entries = build_entries(&configs);
        assert_eq!(entries.len(), 3);
        let items = selectable_items(&entries);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "A");
        assert_eq!(items[1].label, "B");
    }

    #[test]
    fn inert_rows_are_dropped() {
        let configs = vec![EntryConfig {
            label: "no clip, no role".into(),
            ..EntryConfig::default()
        }];
        assert!(build_entries(&configs).is_empty());
    }

    #[test]
    fn stop_and_edit_flags_override_clip() {
        let mut stop = clip_config("Stop", "ignored.mp3");
        stop.stop = true;
        let mut edit = clip_config("Edit", "ignored.mp3");
        edit.edit = true;
        let entries = build_entries(&[stop, edit]);
        let items = selectable_items(&entries);
        assert_eq!(items[0].action, EntryAction::Stop);
        assert_eq!(items[1].action, EntryAction::EditConfig);
    }

    #[test]
    fn eight_clips_plus_separator_plus_edit_address_nine_selectables() {
        let mut configs: Vec<EntryConfig> = (0..8)
            .map(|i| clip_config(&format!("Clip {i}"), &format!("clip{i}.mp3")))
            .collect();
        configs.push(EntryConfig {
            separator: true,
            ..EntryConfig::default()
        });
        configs.push(EntryConfig {
            label: "Edit menu".into(),
            edit: true,
            ..EntryConfig::default()
        });

        let entries = build_entries(&configs);
        assert_eq!(entries.len(), 10);
        let items = selectable_items(&entries);
        assert_eq!(items.len(), 9);

        let selection = crate::selection::SelectionModel::new(items);
        assert_eq!(selection.active_index(), Some(0));
        assert_eq!(selection.len(), 9);
    }
}
