//! Analog clock face, drawn onto any [`Canvas`].
//!
//! Angles are in degrees, measured clockwise from 12 o'clock.

use chrono::Timelike;
use someclock_ui::canvas::Canvas;
use someclock_ui::prelude::{Color, Rect, Vec2};

pub const FACE_FILL: Color = Color::WHITE;
pub const FACE_RIM: Color = Color::rgb_hex(0xD1D5DB);
pub const TICK_COLOR: Color = Color::rgb_hex(0x9CA3AF);
pub const HAND_COLOR: Color = Color::rgb_hex(0x111827);
pub const SECOND_HAND_COLOR: Color = Color::rgb_hex(0xEF4444);

/// Gap between the bounds and the rim.
const FACE_INSET: f32 = 12.0;
const RIM_WIDTH: f32 = 4.0;

const TICK_COUNT: u32 = 60;
const TICK_WIDTH: f32 = 2.0;
const TICK_OUTER_INSET: f32 = 8.0;
const MINOR_TICK_INNER_INSET: f32 = 16.0;
const MAJOR_TICK_INNER_INSET: f32 = 22.0;

const CENTER_DOT_RADIUS: f32 = 6.0;

/// One hand: length as a fraction of the face radius, stroke width, color.
struct HandStyle {
    length: f32,
    width: f32,
    color: Color,
}

const HOUR_HAND: HandStyle = HandStyle { length: 0.5, width: 6.0, color: HAND_COLOR };
const MINUTE_HAND: HandStyle = HandStyle { length: 0.75, width: 4.0, color: HAND_COLOR };
const SECOND_HAND: HandStyle = HandStyle { length: 0.9, width: 2.0, color: SECOND_HAND_COLOR };

/// Hand angles in degrees, each in `[0, 360)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    /// The minute hand creeps with the seconds and the hour hand with the
    /// (fractional) minutes; the second hand jumps.
    pub fn from_time(time: &impl Timelike) -> Self {
        let seconds = time.second() as f32;
        let minutes = time.minute() as f32 + seconds / 60.0;
        let hours = (time.hour() % 12) as f32 + minutes / 60.0;

        Self {
            hour: hours * 30.0,
            minute: minutes * 6.0,
            second: seconds * 6.0,
        }
    }
}

/// Draws the face, the 60 ticks, the three hands and the center dot, in that
/// order, centered in `bounds`. Draws nothing when `bounds` is too small to
/// leave a positive radius.
pub fn draw_clock_face<C>(canvas: &mut C, time: &impl Timelike, bounds: Rect)
where
    C: Canvas + ?Sized,
{
    let center = bounds.center();
    let radius = bounds.min_side() / 2.0 - FACE_INSET;
    if !(radius > 0.0) {
        return;
    }

    draw_face(canvas, center, radius);
    draw_ticks(canvas, center, radius);
    draw_hands(canvas, center, radius, HandAngles::from_time(time));
}

fn draw_face<C: Canvas + ?Sized>(canvas: &mut C, center: Vec2, radius: f32) {
    canvas.set_fill_color(FACE_FILL);
    canvas.set_stroke_color(FACE_RIM);
    canvas.set_stroke_width(RIM_WIDTH);
    canvas.fill_circle(center, radius);
    canvas.stroke_circle(center, radius);
}

fn draw_ticks<C: Canvas + ?Sized>(canvas: &mut C, center: Vec2, radius: f32) {
    canvas.set_stroke_color(TICK_COLOR);
    canvas.set_stroke_width(TICK_WIDTH);

    let outer = radius - TICK_OUTER_INSET;
    for i in 0..TICK_COUNT {
        let dir = Vec2::dial(std::f32::consts::TAU * i as f32 / TICK_COUNT as f32);
        let inner = if i % 5 == 0 {
            radius - MAJOR_TICK_INNER_INSET
        } else {
            radius - MINOR_TICK_INNER_INSET
        };
        canvas.draw_line(center + dir * inner, center + dir * outer);
    }
}

fn draw_hands<C: Canvas + ?Sized>(canvas: &mut C, center: Vec2, radius: f32, angles: HandAngles) {
    draw_hand(canvas, center, radius, angles.hour, &HOUR_HAND);
    draw_hand(canvas, center, radius, angles.minute, &MINUTE_HAND);
    draw_hand(canvas, center, radius, angles.second, &SECOND_HAND);

    canvas.set_fill_color(HAND_COLOR);
    canvas.fill_circle(center, CENTER_DOT_RADIUS);
}

fn draw_hand<C: Canvas + ?Sized>(
    canvas: &mut C,
    center: Vec2,
    radius: f32,
    degrees: f32,
    style: &HandStyle,
) {
    let end = center + Vec2::dial(degrees.to_radians()) * (radius * style.length);
    canvas.set_stroke_color(style.color);
    canvas.set_stroke_width(style.width);
    canvas.draw_line(center, end);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use someclock_ui::canvas::{Primitive, Recorder};

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn close_v(a: Vec2, b: Vec2) -> bool {
        close(a.x, b.x) && close(a.y, b.y)
    }

    // 300 x 200 bounds: center (150, 100), radius 100 - 12 = 88.
    const BOUNDS: Rect = Rect::new(0.0, 0.0, 300.0, 200.0);
    const CENTER: Vec2 = Vec2::new(150.0, 100.0);
    const RADIUS: f32 = 88.0;

    fn record(time: NaiveTime) -> Recorder {
        let mut rec = Recorder::new();
        draw_clock_face(&mut rec, &time, BOUNDS);
        rec
    }

    #[test]
    fn midnight_has_all_hands_up() {
        let a = HandAngles::from_time(&hms(0, 0, 0));
        assert_eq!(a, HandAngles { hour: 0.0, minute: 0.0, second: 0.0 });
    }

    #[test]
    fn six_oclock_points_hour_hand_down() {
        let a = HandAngles::from_time(&hms(6, 0, 0));
        assert_eq!(a, HandAngles { hour: 180.0, minute: 0.0, second: 0.0 });
    }

    #[test]
    fn quarter_past_three_advances_hour_hand() {
        let a = HandAngles::from_time(&hms(3, 15, 0));
        assert!(close(a.hour, 97.5));
        assert!(close(a.minute, 90.0));
    }

    #[test]
    fn afternoon_hours_wrap_to_twelve() {
        assert_eq!(HandAngles::from_time(&hms(15, 0, 0)), HandAngles::from_time(&hms(3, 0, 0)));
    }

    #[test]
    fn angles_stay_below_full_turn_for_every_second_of_the_day() {
        for h in 0..24 {
            for m in 0..60 {
                for s in 0..60 {
                    let a = HandAngles::from_time(&hms(h, m, s));
                    for deg in [a.hour, a.minute, a.second] {
                        assert!((0.0..360.0).contains(&deg), "{h:02}:{m:02}:{s:02} -> {deg}");
                    }
                }
            }
        }
    }

    #[test]
    fn works_with_full_date_times() {
        let t = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(9, 7, 3).unwrap();
        assert_eq!(HandAngles::from_time(&t), HandAngles::from_time(&hms(9, 7, 3)));
    }

    #[test]
    fn draws_sixty_ticks_twelve_of_them_major() {
        let rec = record(hms(10, 10, 30));
        let ticks: Vec<_> = rec.lines().filter(|(_, _, s)| s.color == TICK_COLOR).collect();
        assert_eq!(ticks.len(), 60);

        let major = ticks
            .iter()
            .filter(|(from, _, _)| close((*from - CENTER).length(), RADIUS - 22.0))
            .count();
        assert_eq!(major, 12);

        for (from, to, stroke) in &ticks {
            assert_eq!(stroke.width, 2.0);
            assert!(close((*to - CENTER).length(), RADIUS - 8.0));
            let inner = (*from - CENTER).length();
            assert!(close(inner, RADIUS - 22.0) || close(inner, RADIUS - 16.0));
        }
    }

    #[test]
    fn first_tick_is_major_at_twelve() {
        let rec = record(hms(0, 0, 0));
        let (from, to, _) = rec.lines().next().unwrap();
        assert!(close_v(from, Vec2::new(150.0, 100.0 - (RADIUS - 22.0))));
        assert!(close_v(to, Vec2::new(150.0, 100.0 - (RADIUS - 8.0))));
    }

    #[test]
    fn paints_face_then_ticks_then_hands_then_dot() {
        let prims = record(hms(3, 0, 0)).into_primitives();
        assert_eq!(prims.len(), 2 + 60 + 3 + 1);

        assert_eq!(prims[0], Primitive::FillCircle { center: CENTER, radius: RADIUS, color: FACE_FILL });
        let Primitive::StrokeCircle { radius, stroke, .. } = &prims[1] else {
            panic!("rim should follow the face fill");
        };
        assert_eq!(*radius, RADIUS);
        assert_eq!((stroke.width, stroke.color), (4.0, FACE_RIM));

        assert_eq!(
            prims[65],
            Primitive::FillCircle { center: CENTER, radius: 6.0, color: HAND_COLOR }
        );
    }

    #[test]
    fn hands_have_expected_length_width_and_direction() {
        let rec = record(hms(3, 0, 0));
        let hands: Vec<_> = rec.lines().skip(60).collect();
        assert_eq!(hands.len(), 3);

        // hour at 90 degrees: half the radius to the right
        let (from, to, stroke) = hands[0];
        assert!(close_v(from, CENTER));
        assert!(close_v(to, CENTER + Vec2::new(RADIUS * 0.5, 0.0)));
        assert_eq!((stroke.width, stroke.color), (6.0, HAND_COLOR));

        // minute at 0 degrees: straight up
        let (_, to, stroke) = hands[1];
        assert!(close_v(to, CENTER + Vec2::new(0.0, -RADIUS * 0.75)));
        assert_eq!((stroke.width, stroke.color), (4.0, HAND_COLOR));

        let (_, to, stroke) = hands[2];
        assert!(close_v(to, CENTER + Vec2::new(0.0, -RADIUS * 0.9)));
        assert_eq!((stroke.width, stroke.color), (2.0, SECOND_HAND_COLOR));
    }

    #[test]
    fn offset_bounds_move_the_center() {
        let mut rec = Recorder::new();
        draw_clock_face(&mut rec, &hms(0, 0, 0), Rect::new(40.0, 60.0, 100.0, 100.0));
        let Primitive::FillCircle { center, radius, .. } = &rec.primitives()[0] else {
            panic!("face first");
        };
        assert_eq!(*center, Vec2::new(90.0, 110.0));
        assert_eq!(*radius, 38.0);
    }

    #[test]
    fn degenerate_bounds_draw_nothing() {
        let cases = [
            Rect::new(0.0, 0.0, 24.0, 400.0),
            Rect::new(0.0, 0.0, 0.0, 0.0),
            Rect::new(0.0, 0.0, 10.0, 10.0),
        ];
        for bounds in cases {
            let mut rec = Recorder::new();
            draw_clock_face(&mut rec, &hms(12, 0, 0), bounds);
            assert!(rec.primitives().is_empty(), "{bounds:?}");
        }
    }

    #[test]
    fn draws_through_a_dyn_canvas() {
        let mut rec = Recorder::new();
        {
            let canvas: &mut dyn Canvas = &mut rec;
            draw_clock_face(canvas, &hms(1, 2, 3), BOUNDS);
        }
        assert_eq!(rec.primitives().len(), 66);
    }
}
