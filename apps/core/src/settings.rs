use std::collections::BTreeSet;

pub fn validate_hotkey(input: &str) -> Result<String, String> {
    let raw_parts: Vec<&str> = input
        .split('+')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();

    if raw_parts.len() < 2 {
        return Err("Shortcut must include at least one modifier and one key.".to_string());
    }

    let key = normalize_key(raw_parts[raw_parts.len() - 1])?;

    let mut modifiers: BTreeSet<&'static str> = BTreeSet::new();
    for part in &raw_parts[..raw_parts.len() - 1] {
        modifiers.insert(normalize_modifier(part)?);
    }

    if modifiers.contains("CmdOrCtrl") && (modifiers.contains("Ctrl") || modifiers.contains("Cmd")) {
        return Err("CmdOrCtrl already covers Ctrl and Cmd.".to_string());
    }

    let canonical = canonical_hotkey(&modifiers, &key);
    if is_reserved_hotkey(&canonical) {
        return Err("This shortcut is reserved by browsers. Choose a different one.".to_string());
    }

    Ok(canonical)
}

pub fn validate_recent_capacity(value: usize) -> Result<(), String> {
    if (1..=50).contains(&value) {
        Ok(())
    } else {
        Err("Recent capacity must be between 1 and 50.".to_string())
    }
}

/// Prefixes become part of storage keys, so keep them to a safe alphabet.
pub fn validate_storage_prefix(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("Storage prefix is required.".to_string());
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("Storage prefix may only contain letters, digits, '-' and '_'.".to_string());
    }
    Ok(())
}

fn normalize_modifier(input: &str) -> Result<&'static str, String> {
    match input.to_ascii_lowercase().as_str() {
        "cmdorctrl" | "mod" => Ok("CmdOrCtrl"),
        "ctrl" | "control" => Ok("Ctrl"),
        "cmd" | "meta" | "super" => Ok("Cmd"),
        "alt" | "option" => Ok("Alt"),
        "shift" => Ok("Shift"),
        _ => Err(format!(
            "Unsupported modifier '{input}'. Use CmdOrCtrl, Ctrl, Cmd, Alt, or Shift."
        )),
    }
}

fn normalize_key(input: &str) -> Result<String, String> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err("Shortcut key is required.".to_string());
    }

    let upper = raw.to_ascii_uppercase();
    if upper.len() == 1 {
        let c = upper.chars().next().unwrap_or_default();
        if c.is_ascii_alphanumeric() {
            return Ok(upper);
        }
    }

    Err("Key must be A-Z or 0-9.".to_string())
}

fn canonical_hotkey(modifiers: &BTreeSet<&'static str>, key: &str) -> String {
    let mut ordered = Vec::new();
    for modifier in ["CmdOrCtrl", "Ctrl", "Cmd", "Alt", "Shift"] {
        if modifiers.contains(modifier) {
            ordered.push(modifier);
        }
    }
    ordered.push(key);
    ordered.join("+")
}

fn is_reserved_hotkey(canonical: &str) -> bool {
    matches!(
        canonical,
        "CmdOrCtrl+W"
            | "CmdOrCtrl+T"
            | "CmdOrCtrl+N"
            | "CmdOrCtrl+Q"
            | "CmdOrCtrl+Shift+T"
            | "CmdOrCtrl+Shift+N"
            | "Ctrl+W"
            | "Ctrl+T"
            | "Ctrl+N"
            | "Cmd+W"
            | "Cmd+T"
            | "Cmd+Q"
    )
}
