use serde::{de::IgnoredAny, Deserialize, Deserializer};

pub const DEFAULT_CONFIRM_MESSAGE: &str = "Are you sure?";

/// The declared menus, in file order. The first one is the entry point.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MenuSet {
    menus: Vec<Menu>,
}

impl MenuSet {
    pub fn new(menus: Vec<Menu>) -> Self {
        Self { menus }
    }

    pub fn root(&self) -> Option<&Menu> {
        self.menus.first()
    }

    /// First declared menu with this name wins.
    pub fn by_name(&self, name: &str) -> Option<&Menu> {
        self.menus.iter().find(|m| m.name == name)
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// `(menu, item)` pairs whose `menu` reference names no declared menu.
    pub fn dangling_refs(&self) -> Vec<(&str, &str)> {
        self.menus
            .iter()
            .flat_map(|m| m.items.iter().map(move |i| (m, i)))
            .filter_map(|(m, i)| {
                let target = i.sub_menu()?;
                if self.by_name(target).is_some() {
                    return None;
                }
                Some((m.name.as_str(), i.name.as_str()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub prompt: String,

    #[serde(default)]
    pub items: Vec<MenuItem>,

    #[serde(default, rename = "markup-rows")]
    pub markup_rows: bool,

    #[serde(default, rename = "select-row")]
    pub select_row: i64,
}

impl Menu {
    /// First declared item with this label wins.
    pub fn item_by_name(&self, name: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|i| i.name.as_str())
    }

    /// The synthetic Yes/No menu used to gate a command.
    pub fn confirmation(message: &str) -> Self {
        let message = if message.is_empty() {
            DEFAULT_CONFIRM_MESSAGE
        } else {
            message
        };
        Self {
            message: message.to_string(),
            prompt: "Confirm".to_string(),
            items: vec![MenuItem::leaf("Yes"), MenuItem::leaf("No")],
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "menu")]
    pub sub_menu_ref: String,

    #[serde(default)]
    pub command: String,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default)]
    pub confirm: Confirm,

    #[serde(default, rename = "return")]
    pub return_literal: String,
}

impl MenuItem {
    pub fn leaf(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn sub_menu(&self) -> Option<&str> {
        (!self.sub_menu_ref.is_empty()).then_some(self.sub_menu_ref.as_str())
    }

    pub fn command(&self) -> Option<Command> {
        if self.command.is_empty() {
            return None;
        }
        Some(Command {
            executable: self.command.clone(),
            args: self.args.clone(),
        })
    }

    pub fn return_literal(&self) -> Option<&str> {
        (!self.return_literal.is_empty()).then_some(self.return_literal.as_str())
    }
}

/// Whether running an item's command first needs a Yes/No answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Confirm {
    #[default]
    NoConfirmation,
    DefaultMessage,
    CustomMessage(String),
}

impl Confirm {
    /// The dialog message, or `None` when no confirmation is required.
    pub fn message(&self) -> Option<&str> {
        match self {
            Confirm::NoConfirmation => None,
            Confirm::DefaultMessage => Some(DEFAULT_CONFIRM_MESSAGE),
            Confirm::CustomMessage(msg) => Some(msg.as_str()),
        }
    }
}

// `confirm` is loosely typed in the file: a bool, a string, or anything else
// (treated as unset).
#[derive(Deserialize)]
#[serde(untagged)]
enum RawConfirm {
    Flag(bool),
    Message(String),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for Confirm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawConfirm::deserialize(deserializer)? {
            RawConfirm::Flag(true) => Confirm::DefaultMessage,
            RawConfirm::Flag(false) => Confirm::NoConfirmation,
            RawConfirm::Message(msg) if msg.is_empty() => Confirm::DefaultMessage,
            RawConfirm::Message(msg) => Confirm::CustomMessage(msg),
            RawConfirm::Other(_) => Confirm::NoConfirmation,
        })
    }
}

/// A ready-to-run executable plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub executable: String,
    pub args: Vec<String>,
}

/// What one picker round produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Cancelled,
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(yaml: &str) -> Vec<MenuItem> {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn confirm_shapes() {
        let parsed = items(
            r#"
- name: a
- name: b
  confirm: true
- name: c
  confirm: false
- name: d
  confirm: "Really reboot?"
- name: e
  confirm: [1, 2]
- name: f
  confirm: 3
- name: g
  confirm: ~
"#,
        );
        let confirms: Vec<Confirm> = parsed.into_iter().map(|i| i.confirm).collect();
        assert_eq!(
            confirms,
            vec![
                Confirm::NoConfirmation,
                Confirm::DefaultMessage,
                Confirm::NoConfirmation,
                Confirm::CustomMessage("Really reboot?".to_string()),
                Confirm::NoConfirmation,
                Confirm::NoConfirmation,
                Confirm::NoConfirmation,
            ]
        );
    }

    #[test]
    fn duplicate_names_resolve_to_first_declaration() {
        let set = MenuSet::new(vec![
            Menu {
                name: "main".to_string(),
                message: "first".to_string(),
                items: vec![
                    MenuItem {
                        return_literal: "one".to_string(),
                        ..MenuItem::leaf("dup")
                    },
                    MenuItem {
                        return_literal: "two".to_string(),
                        ..MenuItem::leaf("dup")
                    },
                ],
                ..Default::default()
            },
            Menu {
                name: "main".to_string(),
                message: "second".to_string(),
                ..Default::default()
            },
        ]);

        let menu = set.by_name("main").unwrap();
        assert_eq!(menu.message, "first");
        assert_eq!(menu.item_by_name("dup").unwrap().return_literal(), Some("one"));
    }

    #[test]
    fn command_requires_executable() {
        let mut item = MenuItem::leaf("x");
        item.args = vec!["-l".to_string()];
        assert_eq!(item.command(), None);

        item.command = "ls".to_string();
        assert_eq!(
            item.command(),
            Some(Command {
                executable: "ls".to_string(),
                args: vec!["-l".to_string()],
            })
        );
    }

    #[test]
    fn confirmation_menu_falls_back_to_default_message() {
        let menu = Menu::confirmation("");
        assert_eq!(menu.message, DEFAULT_CONFIRM_MESSAGE);
        assert_eq!(menu.prompt, "Confirm");
        assert_eq!(menu.labels().collect::<Vec<_>>(), vec!["Yes", "No"]);
    }

    #[test]
    fn dangling_refs_are_reported() {
        let set = MenuSet::new(vec![Menu {
            name: "main".to_string(),
            items: vec![
                MenuItem {
                    sub_menu_ref: "main".to_string(),
                    ..MenuItem::leaf("self")
                },
                MenuItem {
                    sub_menu_ref: "power".to_string(),
                    ..MenuItem::leaf("Power")
                },
            ],
            ..Default::default()
        }]);
        assert_eq!(set.dangling_refs(), vec![("main", "Power")]);
    }
}
