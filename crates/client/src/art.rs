//! Artwork registered into the window at startup.
use console_ui::{AnsiArt, AsciiArt, ConsoleWindow, Result};

pub const TITLE: &str = "title";
pub const HEART: &str = "heart";
pub const SLIME: &str = "slime";

const TITLE_TEXT: &str = r"
 ___ _           _        ___
/ __| |_ _  _ __| |_  _  |   \ _  _ _ _  __ _ ___ ___ _ _
\__ \  _| || / _` | || | | |) | || | ' \/ _` / -_) _ \ ' \
|___/\__|\_,_\__,_|\_, | |___/ \_,_|_||_\__, \___\___/_||_|
                   |__/                 |___/
";

const HEART_CELLS: &str = "
. 41 41 . 41 41 .
41 101 41 41 41 41 41
41 41 41 41 41 41 41
. 41 41 41 41 41 .
. . 41 41 41 . .
. . . 41 . . .
";

const SLIME_CELLS: &str = "
. . . 42 42 . . .
. . 42 102 42 42 . .
. 42 42 40:o 42 40:o 42 .
42 42 42 42 42 42 42 42
42 42 42 42 42 42 42 42
";

/// Adds every artwork to the window's registries.
///
/// Fails with a configuration error if a name is already taken.
pub fn register_art(window: &mut ConsoleWindow) -> Result<()> {
    window.add_ascii_art(AsciiArt::from_text(TITLE, title_text(), 0, 2))?;
    window.add_ansi_art(AnsiArt::parse(HEART, HEART_CELLS, 0, 0)?)?;
    window.add_ansi_art(AnsiArt::parse(SLIME, SLIME_CELLS, 0, 0)?)?;
    Ok(())
}

fn title_text() -> &'static str {
    TITLE_TEXT.trim_start_matches('\n').trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_ui::ErrorClass;

    #[test]
    fn registers_all_art_once() {
        let mut window = ConsoleWindow::new(24, 80);
        register_art(&mut window).unwrap();
        assert_eq!(window.ascii_art(TITLE).unwrap().height(), 5);
        assert!(window.ascii_art(TITLE).unwrap().width() < 78);
        assert_eq!(window.ansi_art(HEART).unwrap().width(), 7);
        assert_eq!(window.ansi_art(SLIME).unwrap().height(), 5);

        let err = register_art(&mut window).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Configuration);
    }
}
