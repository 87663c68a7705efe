//! User configuration: debounce delay, keybindings, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/people-picker/config.toml`
//! (default `~/.config/people-picker/config.toml`).

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Debounce delay used when neither the CLI nor the config file sets one.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

// ───────────────────────────────────────── actions ───────────

/// Configurable actions.  Plain characters always go to the input, so the
/// defaults only use named keys and modifier combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    Pick,
    ClearQuery,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::Pick,
        Action::ClearQuery,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::Pick => "pick",
            Action::ClearQuery => "clear_query",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code
            && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    /// Status-bar form, e.g. `"↑"`, `"Ctrl+u"`.
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            code => key_name(code),
        };
        format!("{}{key}", modifier_prefix(self.modifiers))
    }

    /// Config-file form, e.g. `"Up"`, `"Ctrl+u"`.
    fn to_config_string(&self) -> String {
        format!("{}{}", modifier_prefix(self.modifiers), key_name(self.code))
    }

    /// Parse a key string like `"Ctrl+u"`, `"Alt+Up"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let (prefix, key) = s.rsplit_once('+').unwrap_or(("", s));

        let mut modifiers = KeyModifiers::NONE;
        for part in prefix.split('+').filter(|p| !p.is_empty()) {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return None,
            };
        }

        Some(KeyBind::new(key_code(key)?, modifiers))
    }
}

/// Named keys that make sense for picker actions.  Anything else is a single
/// character.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Enter", KeyCode::Enter),
    ("Esc", KeyCode::Esc),
    ("Space", KeyCode::Char(' ')),
];

fn key_code(name: &str) -> Option<KeyCode> {
    if let Some(&(_, code)) = NAMED_KEYS.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
        return Some(code);
    }
    if let Some(n) = name.strip_prefix(['F', 'f']).and_then(|n| n.parse().ok()) {
        return Some(KeyCode::F(n));
    }
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeyCode::Char(c)),
        _ => None,
    }
}

fn key_name(code: KeyCode) -> String {
    if let Some((name, _)) = NAMED_KEYS.iter().find(|(_, c)| *c == code) {
        return name.to_string();
    }
    match code {
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Char(c) => c.to_string(),
        other => format!("{other:?}"),
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    [
        (KeyModifiers::CONTROL, "Ctrl+"),
        (KeyModifiers::ALT, "Alt+"),
        (KeyModifiers::SHIFT, "Shift+"),
    ]
    .into_iter()
    .filter(|(m, _)| modifiers.contains(*m))
    .map(|(_, name)| name)
    .collect()
}

// ───────────────────────────────────────── config ────────────

/// Keybindings and the debounce delay.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Quiet period before a typed query is applied.  Zero means "next tick".
    pub debounce_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let mut m = HashMap::new();

        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('p'), ctrl)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('n'), ctrl)]);
        m.insert(Pick, vec![KeyBind::new(Enter, n)]);
        m.insert(ClearQuery, vec![KeyBind::new(Char('u'), ctrl)]);
        m.insert(Quit, vec![KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action bound to a key event.  When several match, the binding
    /// with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<(Action, u32)> = None;
        for (&action, binds) in &self.bindings {
            for bind in binds.iter().filter(|b| b.matches(event)) {
                let mc = bind.modifiers.bits().count_ones();
                match best {
                    Some((_, best_mc)) if best_mc >= mc => {}
                    _ => best = Some((action, mc)),
                }
            }
        }
        best.map(|(action, _)| action)
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: move | {}: pick | {}: clear | Tab: focus | {}: quit",
            self.short_binding(Action::MoveUp),
            self.short_binding(Action::MoveDown),
            self.short_binding(Action::Pick),
            self.short_binding(Action::ClearQuery),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(err) => {
                tracing::debug!("no config at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Persist the config to the default location.  Returns the path written.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }
        std::fs::write(path, self.serialise())
            .with_context(|| format!("writing config to {}", path.display()))
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            if key == "debounce_ms" {
                // Negative delays degrade to "next tick"; garbage keeps the default.
                match value.parse::<i64>() {
                    Ok(v) => config.debounce_ms = v.max(0) as u64,
                    Err(_) => tracing::warn!("ignoring invalid debounce_ms {value:?}"),
                }
                continue;
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut out = format!(
            "# {name} configuration\n\n\
             # Milliseconds the query must stay unchanged before filtering\n\
             debounce_ms = {ms}\n\n\
             # action = Key1, Key2  (Ctrl+/Alt+/Shift+ prefixes; Up, Down, Enter, Esc, Space, F1-F12, or one character)\n",
            name = env!("CARGO_PKG_NAME"),
            ms = self.debounce_ms,
        );
        for &action in Action::ALL {
            let Some(binds) = self.bindings.get(&action) else {
                continue;
            };
            let keys: Vec<String> = binds.iter().map(KeyBind::to_config_string).collect();
            let _ = writeln!(out, "{} = {}", action.config_key(), keys.join(", "));
        }
        out
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/people-picker/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn defaults() {
        let config = AppConfig::parse_config("");
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(
            config.match_key(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::Pick)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            Some(Action::ClearQuery)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('u'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn debounce_values() {
        assert_eq!(AppConfig::parse_config("debounce_ms = 50").debounce_ms, 50);
        assert_eq!(AppConfig::parse_config("debounce_ms = 0").debounce_ms, 0);
        assert_eq!(AppConfig::parse_config("debounce_ms = -20").debounce_ms, 0);
        assert_eq!(AppConfig::parse_config("debounce_ms = soon").debounce_ms, 300);
    }

    #[test]
    fn rebinding_replaces_defaults_for_that_action() {
        let config = AppConfig::parse_config("quit = Ctrl+q, F10\nbogus = x\n");
        assert_eq!(
            config.match_key(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            config.match_key(key(KeyCode::F(10), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        assert_eq!(config.match_key(key(KeyCode::Esc, KeyModifiers::NONE)), None);
    }

    #[test]
    fn unparsable_bindings_keep_defaults() {
        let config = AppConfig::parse_config("pick = Hyper+Enter, nonsense");
        assert_eq!(config.bindings[&Action::Pick], AppConfig::default_bindings()[&Action::Pick]);
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = std::env::temp_dir().join(format!("people-picker-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut config = AppConfig::default();
        config.debounce_ms = 125;
        config
            .bindings
            .insert(Action::Quit, vec![KeyBind::new(KeyCode::Char('q'), KeyModifiers::ALT)]);

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path);
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(loaded, config);
    }

    #[test]
    fn key_strings() {
        assert_eq!(
            KeyBind::parse("ctrl+alt+Up"),
            Some(KeyBind::new(KeyCode::Up, KeyModifiers::CONTROL | KeyModifiers::ALT))
        );
        assert_eq!(KeyBind::parse("space"), Some(KeyBind::new(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("F3"), Some(KeyBind::new(KeyCode::F(3), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("Meta+x"), None);
        assert_eq!(KeyBind::parse("Ctrl+"), None);
        assert_eq!(KeyBind::new(KeyCode::Char(' '), KeyModifiers::SHIFT).to_config_string(), "Shift+Space");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let loaded = AppConfig::load_from(Path::new("/nonexistent/people-picker.toml"));
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn status_hint_uses_first_bindings() {
        let hint = AppConfig::default().status_bar_hint();
        assert!(hint.starts_with("↑/↓: move | Enter: pick | Ctrl+u: clear"));
        assert!(hint.ends_with("Esc: quit"));
    }
}
