//! Replays `AnsiDriver` output through a virtual terminal.
//!
//! Bytes written by the driver are fed to `vt100`, so assertions are on what
//! a real terminal would show rather than on escape sequences.

use std::io;
use termux2d::{
    AnimationOptions, AnsiDriver, Canvas, Capabilities, Color, ColorSupport, Driver, KeyCode,
    KeyEvent, Palette, Session, animate, polygon,
};

fn replay(bytes: &[u8]) -> vt100::Parser {
    let mut parser = vt100::Parser::new(25, 80, 0);
    parser.process(bytes);
    parser
}

#[test]
fn cells_land_where_written() {
    let mut driver = AnsiDriver::new(Vec::new(), io::empty());
    driver.enter().unwrap();
    driver.write_cell(0, 0, '▘', 0).unwrap();
    driver.write_cell(3, 10, 'x', 0).unwrap();
    driver.write_cell(3, 11, 'y', 0).unwrap();
    driver.refresh().unwrap();

    let parser = replay(driver.writer());
    let screen = parser.screen();
    assert_eq!(screen.cell(0, 0).unwrap().contents(), "▘");
    assert_eq!(screen.cell(3, 10).unwrap().contents(), "x");
    assert_eq!(screen.cell(3, 11).unwrap().contents(), "y");
    assert!(screen.hide_cursor());
    assert!(screen.alternate_screen());
}

#[test]
fn pair_colors_reach_the_screen() {
    let mut driver = AnsiDriver::new(Vec::new(), io::empty());
    driver.enter().unwrap();
    driver
        .register_color_pair(1, Color::RED, Color::BLACK)
        .unwrap();
    driver
        .register_color_pair(11, Color::RED, Color::RED)
        .unwrap();
    driver.write_cell(0, 0, 'a', 1).unwrap();
    driver.write_cell(0, 1, 'b', 11).unwrap();
    driver.write_cell(0, 2, 'c', 0).unwrap();
    driver.refresh().unwrap();

    let parser = replay(driver.writer());
    let screen = parser.screen();
    let a = screen.cell(0, 0).unwrap();
    assert_eq!(a.fgcolor(), vt100::Color::Idx(1));
    assert_eq!(a.bgcolor(), vt100::Color::Idx(0));
    let b = screen.cell(0, 1).unwrap();
    assert_eq!(b.fgcolor(), vt100::Color::Idx(1));
    assert_eq!(b.bgcolor(), vt100::Color::Idx(1));
    let c = screen.cell(0, 2).unwrap();
    assert_eq!(c.fgcolor(), vt100::Color::Default);
    assert_eq!(c.bgcolor(), vt100::Color::Default);
}

#[test]
fn extended_colors_use_256_palette() {
    let mut driver = AnsiDriver::new(Vec::new(), io::empty());
    driver
        .register_color_pair(5, Color::indexed(208), Color::BLACK)
        .unwrap();
    driver.write_cell(1, 1, '*', 5).unwrap();
    driver.refresh().unwrap();

    let parser = replay(driver.writer());
    assert_eq!(
        parser.screen().cell(1, 1).unwrap().fgcolor(),
        vt100::Color::Idx(208)
    );
}

#[test]
fn monochrome_terminal_shows_no_colors() {
    let caps = Capabilities {
        color: ColorSupport::None,
        term_name: None,
    };
    let mut driver = AnsiDriver::new(Vec::new(), io::empty()).with_capabilities(caps);
    driver
        .register_color_pair(1, Color::RED, Color::BLACK)
        .unwrap();
    driver.write_cell(0, 0, 'a', 1).unwrap();
    driver.refresh().unwrap();

    let parser = replay(driver.writer());
    assert_eq!(
        parser.screen().cell(0, 0).unwrap().fgcolor(),
        vt100::Color::Default
    );
}

#[test]
fn exit_restores_cursor_and_main_screen() {
    let mut driver = AnsiDriver::new(Vec::new(), io::empty());
    driver.enter().unwrap();
    driver.write_cell(0, 0, 'z', 0).unwrap();
    driver.exit().unwrap();

    let parser = replay(driver.writer());
    let screen = parser.screen();
    assert!(!screen.hide_cursor());
    assert!(!screen.alternate_screen());
    assert!(!screen.contents().contains('z'));
}

#[test]
fn animation_end_state_matches_canvas() {
    let mut canvas = Canvas::new();
    canvas.set_static([(0, 0, Color::BLUE)]).unwrap();
    let palette = Palette::new();
    let mut driver = AnsiDriver::new(Vec::new(), io::empty()).with_alt_screen(false);
    let mut session = Session::begin(&mut driver).unwrap();
    let frames = (3..6).map(|sides| {
        polygon(20.0, 20.0, sides, 8.0)
            .unwrap()
            .map(|(x, y)| (x, y, Color::GREEN))
            .collect::<Vec<_>>()
    });
    animate(
        &mut canvas,
        &palette,
        &mut session,
        frames,
        AnimationOptions::unthrottled(),
    )
    .unwrap();

    // Replay before the session ends so the last frame is still on screen.
    let parser = replay(session.driver().writer());
    let screen = parser.screen();
    for (pos, _) in canvas.cells() {
        let Some((row, col)) = pos.to_screen() else {
            continue;
        };
        assert_eq!(
            screen.cell(row, col).unwrap().contents(),
            canvas.glyph_at(pos).to_string(),
            "cell {pos:?}"
        );
    }
}

#[test]
fn keys_are_decoded_from_reader() {
    let input: &[u8] = b"\x1b[Aq\r";
    let mut driver = AnsiDriver::new(Vec::new(), input);
    let keys: Vec<KeyEvent> = std::iter::from_fn(|| driver.poll_key().unwrap()).collect();
    assert_eq!(
        keys,
        vec![
            KeyEvent::key(KeyCode::Up),
            KeyEvent::char('q'),
            KeyEvent::key(KeyCode::Enter),
        ]
    );
}
