use serde::{Deserialize, Serialize};

pub const DEFAULT_SHORTCUT: &str = "CmdOrCtrl+Shift+K";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    pub modifiers: Vec<String>,
    pub key: String,
}

/// A keydown as reported by the host, with modifier state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
}

impl KeyEvent {
    pub fn plain(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

pub fn parse_hotkey(input: &str) -> Result<Hotkey, String> {
    let parts: Vec<&str> = input
        .split('+')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.len() < 2 {
        return Err("invalid hotkey".into());
    }

    Ok(Hotkey {
        modifiers: parts[..parts.len() - 1]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        key: parts[parts.len() - 1].to_string(),
    })
}

impl Hotkey {
    pub fn default_shortcut() -> Self {
        Self {
            modifiers: vec!["CmdOrCtrl".to_string(), "Shift".to_string()],
            key: "K".to_string(),
        }
    }

    /// Listed modifiers must be held; unlisted ones are not checked.
    /// `CmdOrCtrl` accepts either Ctrl or Meta.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if !self.key.eq_ignore_ascii_case(&event.key) {
            return false;
        }

        self.modifiers
            .iter()
            .all(|modifier| match modifier.to_ascii_lowercase().as_str() {
                "cmdorctrl" | "mod" => event.ctrl || event.meta,
                "ctrl" | "control" => event.ctrl,
                "cmd" | "meta" | "super" => event.meta,
                "shift" => event.shift,
                "alt" | "option" => event.alt,
                _ => false,
            })
    }

    pub fn label(&self, mac: bool) -> String {
        if mac {
            let mut out = String::new();
            for symbol in ["shift", "alt", "ctrl", "cmd"] {
                if self.has_modifier_for(symbol) {
                    out.push_str(match symbol {
                        "shift" => "\u{21E7}",
                        "alt" => "\u{2325}",
                        "ctrl" => "\u{2303}",
                        _ => "\u{2318}",
                    });
                }
            }
            out.push_str(&self.key.to_ascii_uppercase());
            return out;
        }

        let mut parts: Vec<String> = self
            .modifiers
            .iter()
            .map(|modifier| match modifier.to_ascii_lowercase().as_str() {
                "cmdorctrl" | "mod" | "ctrl" | "control" => "Ctrl".to_string(),
                "cmd" | "meta" | "super" => "Meta".to_string(),
                "shift" => "Shift".to_string(),
                "alt" | "option" => "Alt".to_string(),
                _ => modifier.clone(),
            })
            .collect();
        parts.push(self.key.to_ascii_uppercase());
        parts.join("+")
    }

    fn has_modifier_for(&self, symbol: &str) -> bool {
        self.modifiers.iter().any(|modifier| {
            let lowered = modifier.to_ascii_lowercase();
            match symbol {
                "shift" => lowered == "shift",
                "alt" => lowered == "alt" || lowered == "option",
                "ctrl" => lowered == "ctrl" || lowered == "control",
                _ => matches!(lowered.as_str(), "cmd" | "meta" | "super" | "cmdorctrl" | "mod"),
            }
        })
    }
}
