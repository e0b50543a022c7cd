//! Terminal environment detection.
//!
//! Classification is a pure function of environment variables. Several
//! products set overlapping or inherited markers (a shell inside tmux
//! still carries its host terminal's TERM_PROGRAM), so a fixed precedence
//! order resolves ties deterministically.

use std::collections::HashMap;

/// The exclusive classification: the one terminal product the process is
/// believed to be running inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalApp {
    Tmux,
    Iterm,
    Kitty,
    Wezterm,
    Alacritty,
    /// VS-Code-style embedded/IDE terminal: no split or remote-control
    /// capability, only detached shell processes.
    Embedded,
    Ghostty,
    AppleTerminal,
    None,
}

impl TerminalApp {
    pub fn label(&self) -> &'static str {
        match self {
            TerminalApp::Tmux => "tmux",
            TerminalApp::Iterm => "iTerm2",
            TerminalApp::Kitty => "Kitty",
            TerminalApp::Wezterm => "WezTerm",
            TerminalApp::Alacritty => "Alacritty",
            TerminalApp::Embedded => "VS Code terminal",
            TerminalApp::Ghostty => "Ghostty",
            TerminalApp::AppleTerminal => "Apple Terminal",
            TerminalApp::None => "none",
        }
    }
}

/// Raw presence flags plus the resolved classification.
///
/// Recomputed on every invocation; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalEnvironment {
    pub tmux: bool,
    pub iterm: bool,
    pub apple_terminal: bool,
    pub wezterm: bool,
    pub kitty: bool,
    pub alacritty: bool,
    pub embedded: bool,
    pub ghostty: bool,
    pub app: TerminalApp,
}

impl TerminalEnvironment {
    /// Human-readable one-liner for `termcanvas env`.
    pub fn summary(&self) -> String {
        if self.app == TerminalApp::None {
            return "no supported terminal detected".to_string();
        }

        let mut flagged: Vec<&str> = Vec::new();
        for (set, label) in [
            (self.tmux, "tmux"),
            (self.iterm, "iTerm2"),
            (self.apple_terminal, "Apple Terminal"),
            (self.wezterm, "WezTerm"),
            (self.kitty, "Kitty"),
            (self.alacritty, "Alacritty"),
            (self.embedded, "VS Code terminal"),
            (self.ghostty, "Ghostty"),
        ] {
            if set && label != self.app.label() {
                flagged.push(label);
            }
        }

        if flagged.is_empty() {
            self.app.label().to_string()
        } else {
            format!("{} (markers also present: {})", self.app.label(), flagged.join(", "))
        }
    }
}

/// Detect from the current process environment.
pub fn detect() -> TerminalEnvironment {
    detect_from(&std::env::vars().collect())
}

/// Pure detection over an explicit variable map. No side effects.
pub fn detect_from(vars: &HashMap<String, String>) -> TerminalEnvironment {
    let var = |key: &str| vars.get(key).map(String::as_str).unwrap_or("");
    let term_program = var("TERM_PROGRAM");
    let term = var("TERM");

    let tmux = !var("TMUX").is_empty();
    let iterm = term_program == "iTerm.app" || !var("ITERM_SESSION_ID").is_empty();
    let apple_terminal = term_program == "Apple_Terminal";
    let wezterm = !var("WEZTERM_PANE").is_empty() || term_program == "WezTerm";
    let kitty = !var("KITTY_WINDOW_ID").is_empty() || term == "xterm-kitty";
    let alacritty = !var("ALACRITTY_WINDOW_ID").is_empty() || term == "alacritty";
    let embedded = term_program == "vscode";
    let ghostty = !var("GHOSTTY_RESOURCES_DIR").is_empty() || term_program == "ghostty";

    // Precedence: tmux > iTerm2 > Kitty > WezTerm > Alacritty >
    // embedded host > Ghostty > Apple Terminal > none.
    let app = if tmux {
        TerminalApp::Tmux
    } else if iterm {
        TerminalApp::Iterm
    } else if kitty {
        TerminalApp::Kitty
    } else if wezterm {
        TerminalApp::Wezterm
    } else if alacritty {
        TerminalApp::Alacritty
    } else if embedded {
        TerminalApp::Embedded
    } else if ghostty {
        TerminalApp::Ghostty
    } else if apple_terminal {
        TerminalApp::AppleTerminal
    } else {
        TerminalApp::None
    };

    TerminalEnvironment {
        tmux,
        iterm,
        apple_terminal,
        wezterm,
        kitty,
        alacritty,
        embedded,
        ghostty,
        app,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_environment_classifies_none() {
        let detected = detect_from(&env(&[]));
        assert_eq!(detected.app, TerminalApp::None);
        assert_eq!(detected.summary(), "no supported terminal detected");
    }

    #[test]
    fn test_each_marker_classifies_its_product() {
        let cases: &[(&[(&str, &str)], TerminalApp)] = &[
            (&[("TMUX", "/tmp/tmux-501/default,123,0")], TerminalApp::Tmux),
            (&[("TERM_PROGRAM", "iTerm.app")], TerminalApp::Iterm),
            (&[("ITERM_SESSION_ID", "w0t0p0:AB")], TerminalApp::Iterm),
            (&[("TERM_PROGRAM", "Apple_Terminal")], TerminalApp::AppleTerminal),
            (&[("WEZTERM_PANE", "7")], TerminalApp::Wezterm),
            (&[("TERM_PROGRAM", "WezTerm")], TerminalApp::Wezterm),
            (&[("KITTY_WINDOW_ID", "3")], TerminalApp::Kitty),
            (&[("TERM", "xterm-kitty")], TerminalApp::Kitty),
            (&[("ALACRITTY_WINDOW_ID", "12345")], TerminalApp::Alacritty),
            (&[("TERM", "alacritty")], TerminalApp::Alacritty),
            (&[("TERM_PROGRAM", "vscode")], TerminalApp::Embedded),
            (&[("GHOSTTY_RESOURCES_DIR", "/opt/ghostty")], TerminalApp::Ghostty),
            (&[("TERM_PROGRAM", "ghostty")], TerminalApp::Ghostty),
        ];

        for (pairs, expected) in cases {
            let detected = detect_from(&env(pairs));
            assert_eq!(detected.app, *expected, "for {:?}", pairs);
        }
    }

    #[test]
    fn test_tmux_wins_over_host_terminal_markers() {
        let detected = detect_from(&env(&[
            ("TMUX", "/tmp/tmux-501/default,123,0"),
            ("TERM_PROGRAM", "iTerm.app"),
            ("KITTY_WINDOW_ID", "3"),
        ]));
        assert_eq!(detected.app, TerminalApp::Tmux);
        assert!(detected.iterm);
        assert!(detected.kitty);
    }

    #[test]
    fn test_kitty_wins_over_wezterm() {
        let detected = detect_from(&env(&[
            ("TERM", "xterm-kitty"),
            ("WEZTERM_PANE", "7"),
        ]));
        assert_eq!(detected.app, TerminalApp::Kitty);
    }

    #[test]
    fn test_embedded_wins_over_ghostty_and_apple_terminal() {
        let detected = detect_from(&env(&[
            ("TERM_PROGRAM", "vscode"),
            ("GHOSTTY_RESOURCES_DIR", "/opt/ghostty"),
        ]));
        assert_eq!(detected.app, TerminalApp::Embedded);
    }

    #[test]
    fn test_ghostty_wins_over_apple_terminal() {
        // TERM_PROGRAM can only hold one value, so combine the resource
        // dir marker with the Apple Terminal program marker.
        let detected = detect_from(&env(&[
            ("GHOSTTY_RESOURCES_DIR", "/opt/ghostty"),
            ("TERM_PROGRAM", "Apple_Terminal"),
        ]));
        assert_eq!(detected.app, TerminalApp::Ghostty);
        assert!(detected.apple_terminal);
    }

    #[test]
    fn test_classification_is_exclusive_for_all_flag_combinations() {
        // Every combination of the eight presence flags must resolve to
        // exactly one classification, and an all-false input to None.
        let markers: &[(&str, &str)] = &[
            ("TMUX", "1"),
            ("ITERM_SESSION_ID", "w0"),
            ("KITTY_WINDOW_ID", "1"),
            ("WEZTERM_PANE", "1"),
            ("ALACRITTY_WINDOW_ID", "1"),
            ("TERM_PROGRAM", "vscode"),
            ("GHOSTTY_RESOURCES_DIR", "/x"),
        ];

        for mask in 0u32..(1 << markers.len()) {
            let pairs: Vec<(&str, &str)> = markers
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, pair)| *pair)
                .collect();
            let detected = detect_from(&env(&pairs));

            if mask == 0 {
                assert_eq!(detected.app, TerminalApp::None);
            } else {
                assert_ne!(detected.app, TerminalApp::None, "mask {:#b}", mask);
            }
        }
    }

    #[test]
    fn test_summary_names_shadowed_markers() {
        let detected = detect_from(&env(&[
            ("TMUX", "1"),
            ("TERM_PROGRAM", "iTerm.app"),
        ]));
        let summary = detected.summary();
        assert!(summary.starts_with("tmux"));
        assert!(summary.contains("iTerm2"));
    }
}
