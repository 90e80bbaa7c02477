use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    ScrollUp,
    ScrollDown,
    NextTab,
    SidebarUp,
    SidebarDown,
    OpenSelected,
    Back,
    ToggleLanguage,
    Reload,
    OpenInBrowser,
    OpenVideo,
    ShowHelp,
    HideHelp,
}

pub fn handle_key_event(key: KeyEvent, show_help: bool) -> Option<AppAction> {
    // If help is showing, any key closes it
    if show_help {
        return Some(AppAction::HideHelp);
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => Some(AppAction::Quit),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppAction::Quit),

        (KeyCode::Char('j'), _) | (KeyCode::PageDown, _) => Some(AppAction::ScrollDown),
        (KeyCode::Char('k'), _) | (KeyCode::PageUp, _) => Some(AppAction::ScrollUp),

        (KeyCode::Tab, _) => Some(AppAction::NextTab),
        (KeyCode::Char('J'), _) | (KeyCode::Down, _) => Some(AppAction::SidebarDown),
        (KeyCode::Char('K'), _) | (KeyCode::Up, _) => Some(AppAction::SidebarUp),
        (KeyCode::Enter, _) => Some(AppAction::OpenSelected),
        (KeyCode::Backspace, _) => Some(AppAction::Back),

        (KeyCode::Char('l'), _) => Some(AppAction::ToggleLanguage),
        (KeyCode::Char('r'), _) => Some(AppAction::Reload),
        (KeyCode::Char('o'), _) => Some(AppAction::OpenInBrowser),
        (KeyCode::Char('v'), _) => Some(AppAction::OpenVideo),

        (KeyCode::Char('?'), _) => Some(AppAction::ShowHelp),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn help_swallows_every_key() {
        let key = press(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, true), Some(AppAction::HideHelp));
    }

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(
            handle_key_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL), false),
            Some(AppAction::Quit)
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Tab, KeyModifiers::NONE), false),
            Some(AppAction::NextTab)
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('J'), KeyModifiers::SHIFT), false),
            Some(AppAction::SidebarDown)
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Backspace, KeyModifiers::NONE), false),
            Some(AppAction::Back)
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('x'), KeyModifiers::NONE), false),
            None
        );
    }
}
