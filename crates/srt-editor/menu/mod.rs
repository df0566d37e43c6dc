//! Menu model and keyboard shortcut dispatch
//!
//! Menus are plain data: a tree of buttons, separators and submenus. Buttons
//! name an [`EditorAction`] instead of holding a callback, so one dispatcher
//! ([`find_action`]) serves both clicks and key presses and the host decides
//! how to run the action (usually [`EditorDocument::perform`]).
//!
//! [`EditorDocument::perform`]: crate::EditorDocument::perform

use core::fmt;

bitflags::bitflags! {
    /// Modifier keys held during a key press
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        /// Control key
        const CONTROL = 1 << 0;
        /// Shift key
        const SHIFT = 1 << 1;
        /// Alt / Option key
        const ALT = 1 << 2;
        /// Meta / Command key
        const META = 1 << 3;
        /// Enter held as a chord modifier
        const ENTER = 1 << 4;
    }
}

/// Operating system family, decides which shortcut set applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS: Command replaces Control
    Darwin,
    Other,
}

impl Platform {
    /// Platform this binary was built for
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::Darwin
        } else {
            Self::Other
        }
    }
}

/// Key press reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(modifiers: Modifiers, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }
}

/// Key combination that triggers a menu button
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shortcut {
    pub modifiers: Modifiers,
    pub key: String,
}

impl Shortcut {
    pub fn new(modifiers: Modifiers, key: impl Into<String>) -> Self {
        Self {
            modifiers,
            key: key.into(),
        }
    }

    /// Exact modifier match, case-insensitive key match
    pub fn matches(&self, chord: &KeyChord) -> bool {
        self.modifiers == chord.modifiers && self.key.eq_ignore_ascii_case(&chord.key)
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Modifiers, &str); 5] = [
            (Modifiers::CONTROL, "Ctrl"),
            (Modifiers::META, "Cmd"),
            (Modifiers::ALT, "Alt"),
            (Modifiers::SHIFT, "Shift"),
            (Modifiers::ENTER, "Enter"),
        ];
        for (flag, name) in NAMES {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{}", self.key.to_uppercase())
    }
}

/// Everything a menu button or shortcut can ask the editor to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditorAction {
    Open,
    Save,
    Undo,
    Redo,
    SelectAll,
    NewLine,
    InsertLineAfter,
    InsertLineBefore,
    MergeSelected,
    RemoveSelected,
    LockTime,
    UnlockTime,
    Translate,
}

/// One entry of a menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Button {
        label: String,
        action: EditorAction,
        shortcut: Option<Shortcut>,
        /// Replaces `shortcut` on Darwin when set
        darwin_shortcut: Option<Shortcut>,
        disabled: bool,
    },
    Separator,
    Submenu {
        label: String,
        items: Vec<MenuItem>,
        disabled: bool,
    },
}

impl MenuItem {
    /// Enabled button without shortcuts
    pub fn button(label: impl Into<String>, action: EditorAction) -> Self {
        Self::Button {
            label: label.into(),
            action,
            shortcut: None,
            darwin_shortcut: None,
            disabled: false,
        }
    }

    pub fn submenu(label: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self::Submenu {
            label: label.into(),
            items,
            disabled: false,
        }
    }

    /// Set the shortcut of a button; other items are returned unchanged
    #[must_use]
    pub fn with_shortcut(mut self, value: Shortcut) -> Self {
        if let Self::Button { shortcut, .. } = &mut self {
            *shortcut = Some(value);
        }
        self
    }

    /// Set the Darwin shortcut of a button; other items are returned unchanged
    #[must_use]
    pub fn with_darwin_shortcut(mut self, value: Shortcut) -> Self {
        if let Self::Button {
            darwin_shortcut, ..
        } = &mut self
        {
            *darwin_shortcut = Some(value);
        }
        self
    }

    /// Mark a button or submenu as disabled
    #[must_use]
    pub fn disabled(mut self) -> Self {
        match &mut self {
            Self::Button { disabled, .. } | Self::Submenu { disabled, .. } => *disabled = true,
            Self::Separator => {}
        }
        self
    }

    /// Shortcut in effect on `platform`
    pub fn shortcut_for(&self, platform: Platform) -> Option<&Shortcut> {
        match self {
            Self::Button {
                shortcut,
                darwin_shortcut,
                ..
            } => match platform {
                Platform::Darwin => darwin_shortcut.as_ref().or(shortcut.as_ref()),
                Platform::Other => shortcut.as_ref(),
            },
            _ => None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            Self::Button { disabled, .. } | Self::Submenu { disabled, .. } => *disabled,
            Self::Separator => false,
        }
    }
}

/// Top-level menu bar entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub label: String,
    pub items: Vec<MenuItem>,
    pub disabled: bool,
}

impl Menu {
    pub fn new(label: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            label: label.into(),
            items,
            disabled: false,
        }
    }
}

/// Action bound to `chord` on `platform`, searching menus depth-first
///
/// Disabled menus, submenus and buttons never match.
pub fn find_action(menus: &[Menu], chord: &KeyChord, platform: Platform) -> Option<EditorAction> {
    menus
        .iter()
        .filter(|menu| !menu.disabled)
        .find_map(|menu| find_in_items(&menu.items, chord, platform))
}

fn find_in_items(items: &[MenuItem], chord: &KeyChord, platform: Platform) -> Option<EditorAction> {
    items.iter().find_map(|item| match item {
        _ if item.is_disabled() => None,
        MenuItem::Button { action, .. } => item
            .shortcut_for(platform)
            .filter(|shortcut| shortcut.matches(chord))
            .map(|_| *action),
        MenuItem::Submenu { items, .. } => find_in_items(items, chord, platform),
        MenuItem::Separator => None,
    })
}

/// Menu bar of the subtitle editor
pub fn default_menus() -> Vec<Menu> {
    let command = |key: &str| {
        (
            Shortcut::new(Modifiers::CONTROL, key),
            Shortcut::new(Modifiers::META, key),
        )
    };
    let bound = |label: &str, action, (shortcut, darwin): (Shortcut, Shortcut)| {
        MenuItem::button(label, action)
            .with_shortcut(shortcut)
            .with_darwin_shortcut(darwin)
    };

    let redo = (
        Shortcut::new(Modifiers::CONTROL | Modifiers::SHIFT, "z"),
        Shortcut::new(Modifiers::META | Modifiers::SHIFT, "z"),
    );

    vec![
        Menu::new(
            "File",
            vec![
                bound("Open", EditorAction::Open, command("o")),
                bound("Save", EditorAction::Save, command("s")),
            ],
        ),
        Menu::new(
            "Edit",
            vec![
                bound("Undo", EditorAction::Undo, command("z")),
                bound("Redo", EditorAction::Redo, redo),
                MenuItem::Separator,
                bound("Select all", EditorAction::SelectAll, command("a")),
                MenuItem::Separator,
                MenuItem::button("New line", EditorAction::NewLine),
                MenuItem::submenu(
                    "Insert line",
                    vec![
                        MenuItem::button("After selection", EditorAction::InsertLineAfter),
                        MenuItem::button("Before selection", EditorAction::InsertLineBefore),
                    ],
                ),
                MenuItem::button("Merge selected", EditorAction::MergeSelected),
                MenuItem::button("Remove selected", EditorAction::RemoveSelected),
            ],
        ),
        Menu::new(
            "Subtitle",
            vec![
                MenuItem::button("Lock time", EditorAction::LockTime),
                MenuItem::button("Unlock time", EditorAction::UnlockTime),
                MenuItem::Separator,
                MenuItem::button("Translate line", EditorAction::Translate),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(key: &str) -> KeyChord {
        KeyChord::new(Modifiers::CONTROL, key)
    }

    fn cmd(key: &str) -> KeyChord {
        KeyChord::new(Modifiers::META, key)
    }

    #[test]
    fn command_key_depends_on_platform() {
        let menus = default_menus();
        assert_eq!(
            find_action(&menus, &ctrl("s"), Platform::Other),
            Some(EditorAction::Save)
        );
        assert_eq!(find_action(&menus, &cmd("s"), Platform::Other), None);
        assert_eq!(
            find_action(&menus, &cmd("S"), Platform::Darwin),
            Some(EditorAction::Save)
        );
        assert_eq!(find_action(&menus, &ctrl("s"), Platform::Darwin), None);
    }

    #[test]
    fn open_and_select_all() {
        let menus = default_menus();
        assert_eq!(
            find_action(&menus, &ctrl("o"), Platform::Other),
            Some(EditorAction::Open)
        );
        assert_eq!(
            find_action(&menus, &cmd("a"), Platform::Darwin),
            Some(EditorAction::SelectAll)
        );
    }

    #[test]
    fn modifiers_must_match_exactly() {
        let menus = default_menus();
        let chord = KeyChord::new(Modifiers::CONTROL | Modifiers::SHIFT, "z");
        assert_eq!(
            find_action(&menus, &chord, Platform::Other),
            Some(EditorAction::Redo)
        );
        assert_eq!(
            find_action(&menus, &ctrl("z"), Platform::Other),
            Some(EditorAction::Undo)
        );
        let bare = KeyChord::new(Modifiers::empty(), "s");
        assert_eq!(find_action(&menus, &bare, Platform::Other), None);
    }

    #[test]
    fn disabled_entries_are_skipped() {
        let save = Shortcut::new(Modifiers::CONTROL, "s");
        let menus = vec![
            Menu::new(
                "A",
                vec![MenuItem::button("Save", EditorAction::Save)
                    .with_shortcut(save.clone())
                    .disabled()],
            ),
            Menu::new(
                "B",
                vec![MenuItem::submenu(
                    "Nested",
                    vec![MenuItem::button("Also save", EditorAction::Translate)
                        .with_shortcut(save.clone())],
                )
                .disabled()],
            ),
            Menu::new(
                "C",
                vec![
                    MenuItem::Separator,
                    MenuItem::submenu(
                        "Deep",
                        vec![MenuItem::button("Deep save", EditorAction::NewLine)
                            .with_shortcut(save)],
                    ),
                ],
            ),
        ];

        assert_eq!(
            find_action(&menus, &ctrl("s"), Platform::Other),
            Some(EditorAction::NewLine)
        );
    }

    #[test]
    fn darwin_falls_back_to_generic_shortcut() {
        let item = MenuItem::button("Translate", EditorAction::Translate)
            .with_shortcut(Shortcut::new(Modifiers::ALT, "t"));
        assert_eq!(
            item.shortcut_for(Platform::Darwin),
            Some(&Shortcut::new(Modifiers::ALT, "t"))
        );
        assert_eq!(MenuItem::Separator.shortcut_for(Platform::Other), None);
    }

    #[test]
    fn shortcut_labels() {
        let redo = Shortcut::new(Modifiers::CONTROL | Modifiers::SHIFT, "z");
        assert_eq!(redo.to_string(), "Ctrl+Shift+Z");
        assert_eq!(Shortcut::new(Modifiers::META, "s").to_string(), "Cmd+S");
    }
}
