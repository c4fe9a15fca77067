use crate::selector::Selector;

pub const HELP: &str = "\
Commands:
  a prev | a next     step selector A back or forward
  b prev | b next     step selector B back or forward
  a pick <uid>        select a UID explicitly (same for b)
  show                print the current comparison
  logout              forget all histories and suggestions
  help                print this help
  quit                exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Previous(Selector),
    Next(Selector),
    Pick(Selector, String),
    Show,
    Logout,
    Help,
    Quit,
}

/// Parse one input line. Blank or unknown lines yield None.
pub fn parse_action(line: &str) -> Option<UserAction> {
    let mut words = line.split_whitespace();
    let first = words.next()?.to_ascii_lowercase();

    let action = match first.as_str() {
        "show" | "s" => UserAction::Show,
        "logout" => UserAction::Logout,
        "help" | "?" => UserAction::Help,
        "quit" | "q" | "exit" => UserAction::Quit,
        "a" | "b" => {
            let selector = if first == "a" { Selector::A } else { Selector::B };
            match words.next()?.to_ascii_lowercase().as_str() {
                "prev" | "p" | "left" => UserAction::Previous(selector),
                "next" | "n" | "right" => UserAction::Next(selector),
                "pick" => UserAction::Pick(selector, words.next()?.to_string()),
                _ => return None,
            }
        }
        _ => return None,
    };

    if words.next().is_some() {
        return None;
    }
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selector_moves() {
        assert_eq!(parse_action("a prev"), Some(UserAction::Previous(Selector::A)));
        assert_eq!(parse_action("  B  next "), Some(UserAction::Next(Selector::B)));
        assert_eq!(parse_action("b left"), Some(UserAction::Previous(Selector::B)));
        assert_eq!(
            parse_action("a pick yt:abc"),
            Some(UserAction::Pick(Selector::A, "yt:abc".to_string()))
        );
    }

    #[test]
    fn parses_session_commands() {
        assert_eq!(parse_action("show"), Some(UserAction::Show));
        assert_eq!(parse_action("logout"), Some(UserAction::Logout));
        assert_eq!(parse_action("q"), Some(UserAction::Quit));
        assert_eq!(parse_action("?"), Some(UserAction::Help));
    }

    #[test]
    fn rejects_unknown_or_incomplete_input() {
        assert_eq!(parse_action(""), None);
        assert_eq!(parse_action("a"), None);
        assert_eq!(parse_action("a pick"), None);
        assert_eq!(parse_action("c next"), None);
        assert_eq!(parse_action("a next now"), None);
    }
}
