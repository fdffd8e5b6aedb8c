//! Frame composition
//!
//! The actual pixels belong to whatever implements `DrawSurface`; this module
//! decides what gets drawn, where, and in which order.

pub mod text;

use glam::IVec2;

use crate::Facing;
use crate::sim::{APEX_MESSAGE, RESTART_HINT, Rect, Session, SessionPhase, WIN_MESSAGE};

pub use text::{centered, stack_lines, wrap_text};

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

pub const BACKGROUND: Color = Color(0, 0, 255);
pub const WHITE: Color = Color(255, 255, 255);
pub const RED: Color = Color(255, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectStyle {
    Filled,
    /// Border of the given pixel width
    Outline(i32),
}

/// Images the game draws, scaled to the destination rect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Player(Facing),
    Mobile(Facing),
    Decoration(usize),
}

/// Draw target supplied by the windowing backend
pub trait DrawSurface {
    fn fill(&mut self, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color, style: RectStyle);
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect);
    /// Draw white text into `rect` with the given opacity
    fn draw_text(&mut self, text: &str, rect: Rect, alpha: u8);
    /// Rendered size of `text` in the message font
    fn text_size(&self, text: &str) -> IVec2;
    fn present(&mut self);
}

/// Spacing between wrapped message lines
const LINE_SPACING: i32 = 5;
/// Horizontal margin kept free on both sides of wrapped messages
const TEXT_MARGIN: i32 = 20;

/// Whether an invulnerable player is in the hidden half of its 10 Hz blink
pub fn blink_hidden(now: f64) -> bool {
    (now * 10.0).round() as i64 % 2 == 1
}

/// Draw one full frame of the session and present it
pub fn draw_frame<S: DrawSurface + ?Sized>(session: &Session, surface: &mut S, now: f64) {
    let camera = &session.camera;
    let config = &session.config;
    let half = session.viewport() / 2;

    surface.fill(BACKGROUND);

    for decoration in &session.pool.decorations {
        surface.draw_sprite(
            Sprite::Decoration(decoration.variant),
            camera.rect_to_screen(decoration.rect()),
        );
    }

    for mobile in &session.pool.mobiles {
        surface.draw_sprite(
            Sprite::Mobile(mobile.facing),
            camera.rect_to_screen(mobile.hit_rect()),
        );
    }

    let player = &session.player;
    let hidden = session.phase.is_game_over() || (player.is_invulnerable(now) && blink_hidden(now));
    if !hidden {
        surface.draw_sprite(
            Sprite::Player(player.facing),
            camera.rect_to_screen(player.hit_rect()),
        );
    }

    draw_health_meter(surface, player.health, player.max_health);

    match session.phase {
        SessionPhase::GameOver { .. } => {
            let max_width = config.win_width - 2 * TEXT_MARGIN;
            let lines = wrap_text(session.game_over_message, max_width, |s| {
                surface.text_size(s).x
            });
            let sizes: Vec<IVec2> = lines.iter().map(|l| surface.text_size(l)).collect();
            for (line, rect) in lines.iter().zip(stack_lines(&sizes, half, LINE_SPACING)) {
                surface.draw_text(line, rect, 255);
            }
        }
        SessionPhase::Won => {
            let win = centered(surface.text_size(WIN_MESSAGE), half);
            surface.draw_text(WIN_MESSAGE, win, 255);
            let hint = centered(surface.text_size(RESTART_HINT), half + IVec2::new(0, 30));
            surface.draw_text(RESTART_HINT, hint, 255);
        }
        SessionPhase::Playing => {}
    }

    if let Some(alpha) = session.apex_announcement.and_then(|a| a.alpha(now)) {
        let rect = centered(surface.text_size(APEX_MESSAGE), half - IVec2::new(0, 50));
        surface.draw_text(APEX_MESSAGE, rect, alpha);
    }

    surface.present();
}

/// Stacked health cells in the top-left corner, filled bottom-up
pub fn draw_health_meter<S: DrawSurface + ?Sized>(surface: &mut S, health: u32, max_health: u32) {
    let cell = |i: u32| Rect::new(15, 5 + 10 * max_health as i32 - i as i32 * 10, 20, 10);
    for i in 0..health.min(max_health) {
        surface.draw_rect(cell(i), RED, RectStyle::Filled);
    }
    for i in 0..max_health {
        surface.draw_rect(cell(i), WHITE, RectStyle::Outline(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{Announcement, TickInput, tick};

    /// Records every call for inspection
    #[derive(Default)]
    struct Recorder {
        sprites: Vec<(Sprite, Rect)>,
        rects: Vec<(Rect, Color, RectStyle)>,
        texts: Vec<(String, Rect, u8)>,
        fills: usize,
        presents: usize,
    }

    impl DrawSurface for Recorder {
        fn fill(&mut self, _color: Color) {
            self.fills += 1;
        }
        fn draw_rect(&mut self, rect: Rect, color: Color, style: RectStyle) {
            self.rects.push((rect, color, style));
        }
        fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) {
            self.sprites.push((sprite, rect));
        }
        fn draw_text(&mut self, text: &str, rect: Rect, alpha: u8) {
            self.texts.push((text.to_string(), rect, alpha));
        }
        fn text_size(&self, text: &str) -> IVec2 {
            IVec2::new(text.len() as i32 * 16, 32)
        }
        fn present(&mut self) {
            self.presents += 1;
        }
    }

    fn played_session() -> Session {
        let mut session = Session::new(GameConfig::default(), 4242, 0.0).unwrap();
        tick(&mut session, &TickInput::default(), 0.0);
        session
    }

    fn player_sprites(recorder: &Recorder) -> usize {
        recorder
            .sprites
            .iter()
            .filter(|(s, _)| matches!(s, Sprite::Player(_)))
            .count()
    }

    #[test]
    fn test_frame_draws_everything_once() {
        let session = played_session();
        let mut surface = Recorder::default();
        draw_frame(&session, &mut surface, 0.0);

        assert_eq!(surface.fills, 1);
        assert_eq!(surface.presents, 1);
        assert_eq!(
            surface.sprites.len(),
            session.pool.decorations.len() + session.pool.mobiles.len() + 1
        );
        assert_eq!(player_sprites(&surface), 1);
        assert!(surface.texts.is_empty());
    }

    #[test]
    fn test_player_drawn_in_screen_space() {
        let mut session = played_session();
        session.camera.offset = IVec2::new(100, 50);
        let mut surface = Recorder::default();
        draw_frame(&session, &mut surface, 0.0);
        let (_, rect) = surface
            .sprites
            .iter()
            .find(|(s, _)| matches!(s, Sprite::Player(_)))
            .copied()
            .unwrap();
        assert_eq!(rect.x, session.player.position.x - 100);
    }

    #[test]
    fn test_health_meter_cells() {
        let mut surface = Recorder::default();
        draw_health_meter(&mut surface, 2, 3);
        let filled: Vec<_> = surface
            .rects
            .iter()
            .filter(|(_, c, _)| *c == RED)
            .map(|(r, _, _)| *r)
            .collect();
        assert_eq!(filled, vec![Rect::new(15, 35, 20, 10), Rect::new(15, 25, 20, 10)]);
        let outlines = surface.rects.iter().filter(|(_, c, _)| *c == WHITE).count();
        assert_eq!(outlines, 3);
    }

    #[test]
    fn test_game_over_hides_player_and_wraps_message() {
        let mut session = played_session();
        session.phase = SessionPhase::GameOver { since: 0.0 };
        let mut surface = Recorder::default();
        draw_frame(&session, &mut surface, 1.0);

        assert_eq!(player_sprites(&surface), 0);
        assert!(!surface.texts.is_empty());
        for (line, rect, _) in &surface.texts {
            assert!(rect.w <= 600, "line too wide: {}", line);
        }
        let joined: Vec<&str> = surface.texts.iter().map(|(t, _, _)| t.as_str()).collect();
        assert_eq!(joined.join(" "), session.game_over_message);
    }

    #[test]
    fn test_invulnerable_player_blinks() {
        let mut session = played_session();
        session.player.invulnerable_until = Some(5.0);

        let mut shown = Recorder::default();
        draw_frame(&session, &mut shown, 1.0);
        assert_eq!(player_sprites(&shown), 1);

        let mut hidden = Recorder::default();
        draw_frame(&session, &mut hidden, 1.1);
        assert_eq!(player_sprites(&hidden), 0);
    }

    #[test]
    fn test_win_and_apex_messages() {
        let mut session = played_session();
        session.phase = SessionPhase::Won;
        session.apex_announcement = Some(Announcement::new(0.0, 6.0));
        let mut surface = Recorder::default();
        draw_frame(&session, &mut surface, 3.0);

        let texts: Vec<(&str, u8)> = surface
            .texts
            .iter()
            .map(|(t, _, a)| (t.as_str(), *a))
            .collect();
        assert_eq!(
            texts,
            vec![(WIN_MESSAGE, 255), (RESTART_HINT, 255), (APEX_MESSAGE, 127)]
        );
    }
}
