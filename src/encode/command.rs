use anyhow::{bail, Result};

/// Bits of a command word holding the command id; the rest holds the repeat count.
pub const CMD_BITS: u32 = 3;

/// Geometry drawing commands, numbered as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveTo = 1,
    LineTo = 2,
    ClosePath = 7,
}

impl Command {
    #[inline] pub fn id(self) -> u32 { self as u32 }

    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Command::MoveTo),
            2 => Some(Command::LineTo),
            7 => Some(Command::ClosePath),
            _ => None,
        }
    }

    /// Pack a command run header.
    #[inline]
    pub fn word(self, length: u32) -> u32 { (length << CMD_BITS) | (self.id() & ((1 << CMD_BITS) - 1)) }
}

/// Map a signed delta onto the unsigned integers, small magnitudes first.
#[inline] pub fn zigzag(v: i32) -> u32 { ((v << 1) ^ (v >> 31)) as u32 }

/// Inverse of [`zigzag`].
#[inline] pub fn unzigzag(v: u32) -> i32 { ((v >> 1) as i32) ^ -((v & 1) as i32) }

/// Per-feature command/coordinate encoder.
///
/// Consecutive operations with the same command are grouped into one run whose header word
/// is a placeholder until the run is closed by a different command or by [`finish`].
///
/// [`finish`]: GeometryEncoder::finish
#[derive(Debug, Clone, Default)]
pub struct GeometryEncoder {
    geometry: Vec<u32>,
    x: i32,
    y: i32,
    cmd_idx: Option<usize>, // position of the active run's header word
    cmd: Option<Command>,
    length: u32,
}

impl GeometryEncoder {
    pub fn new() -> Self { Self::default() }

    /// Current pen position.
    #[inline] pub fn position(&self) -> (i32, i32) { (self.x, self.y) }

    /// Whether any command has been emitted yet.
    #[inline] pub fn is_active(&self) -> bool { self.cmd_idx.is_some() }

    /// Append one operation. Coordinates are ignored for [`Command::ClosePath`].
    pub fn emit(&mut self, cmd: Command, x: i32, y: i32) {
        if self.cmd != Some(cmd) {
            self.close_run();
            self.cmd = Some(cmd);
            self.length = 0;
            self.cmd_idx = Some(self.geometry.len());
            self.geometry.push(0);
        }

        match cmd {
            Command::MoveTo | Command::LineTo => {
                self.geometry.push(zigzag(x.wrapping_sub(self.x)));
                self.geometry.push(zigzag(y.wrapping_sub(self.y)));
                self.x = x;
                self.y = y;
                self.length += 1;
            }
            Command::ClosePath => self.length += 1,
        }
    }

    #[inline] pub fn move_to(&mut self, x: i32, y: i32) { self.emit(Command::MoveTo, x, y) }

    #[inline] pub fn line_to(&mut self, x: i32, y: i32) { self.emit(Command::LineTo, x, y) }

    #[inline] pub fn close_path(&mut self) { self.emit(Command::ClosePath, self.x, self.y) }

    fn close_run(&mut self) {
        if let (Some(idx), Some(cmd)) = (self.cmd_idx, self.cmd) {
            self.geometry[idx] = cmd.word(self.length);
        }
    }

    /// Close the active run and return the packed command stream.
    pub fn finish(mut self) -> Vec<u32> {
        self.close_run();
        self.geometry
    }
}

/// Decode a packed command stream into (command, absolute x, absolute y) operations.
///
/// `ClosePath` operations report the pen position at the time they were issued.
pub fn decode_geometry(geometry: &[u32]) -> Result<Vec<(Command, i32, i32)>> {
    let mut ops = Vec::new();
    let (mut x, mut y) = (0i32, 0i32);
    let mut words = geometry.iter().copied();

    while let Some(word) = words.next() {
        let Some(cmd) = Command::from_id(word & ((1 << CMD_BITS) - 1)) else {
            bail!("[encode::command] unknown command id in word {word:#x}");
        };
        for _ in 0..word >> CMD_BITS {
            if cmd != Command::ClosePath {
                let (Some(dx), Some(dy)) = (words.next(), words.next()) else {
                    bail!("[encode::command] truncated coordinates in {:?} run", cmd);
                };
                x = x.wrapping_add(unzigzag(dx));
                y = y.wrapping_add(unzigzag(dy));
            }
            ops.push((cmd, x, y));
        }
    }

    Ok(ops)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn coord() -> impl Strategy<Value = i32> {
        prop_oneof![any::<i32>(), -4096..=8192i32]
    }

    fn ops() -> impl Strategy<Value = Vec<(Command, i32, i32)>> {
        let cmd = prop_oneof![Just(Command::MoveTo), Just(Command::LineTo), Just(Command::ClosePath)];
        prop::collection::vec((cmd, coord(), coord()), 0..96)
    }

    proptest! {
        #[test]
        fn zigzag_round_trips(v in any::<i32>()) {
            prop_assert_eq!(unzigzag(zigzag(v)), v);
        }

        #[test]
        fn zigzag_small_magnitudes_stay_small(v in -4096..=4096i32) {
            prop_assert_eq!(zigzag(v), v.unsigned_abs() * 2 - u32::from(v < 0));
        }

        #[test]
        fn encoded_ops_decode_to_absolute_positions(ops in ops()) {
            let mut encoder = GeometryEncoder::new();
            let mut expected = Vec::with_capacity(ops.len());
            let mut pen = (0, 0);
            for (cmd, x, y) in ops {
                encoder.emit(cmd, x, y);
                if cmd != Command::ClosePath { pen = (x, y) }
                expected.push((cmd, pen.0, pen.1));
            }
            let runs = expected.windows(2).filter(|w| w[0].0 != w[1].0).count() + usize::from(!expected.is_empty());
            let geometry = encoder.finish();
            let headers = {
                let mut count = 0;
                let mut i = 0;
                while i < geometry.len() {
                    let word = geometry[i];
                    let coords = if word & 7 == Command::ClosePath.id() { 0 } else { 2 * (word >> CMD_BITS) as usize };
                    count += 1;
                    i += 1 + coords;
                }
                count
            };
            prop_assert_eq!(headers, runs);
            prop_assert_eq!(decode_geometry(&geometry).unwrap(), expected);
        }
    }

    #[test]
    fn zigzag_known_values() {
        assert_eq!(zigzag(0), 0);
        assert_eq!(zigzag(-1), 1);
        assert_eq!(zigzag(1), 2);
        assert_eq!(zigzag(-2), 3);
        assert_eq!(zigzag(i32::MAX), u32::MAX - 1);
        assert_eq!(zigzag(i32::MIN), u32::MAX);
    }

    #[test]
    fn zigzag_inverts() {
        for v in [0, 1, -1, 2, -2, 4095, -4095, i32::MAX, i32::MIN, i32::MAX - 1, i32::MIN + 1] {
            assert_eq!(unzigzag(zigzag(v)), v);
        }
    }

    #[test]
    fn command_words() {
        assert_eq!(Command::MoveTo.word(1), 9);
        assert_eq!(Command::LineTo.word(3), 26);
        assert_eq!(Command::ClosePath.word(1), 15);
        assert_eq!(Command::from_id(2), Some(Command::LineTo));
        assert_eq!(Command::from_id(3), None);
    }

    #[test]
    fn empty_encoder_yields_nothing() {
        let encoder = GeometryEncoder::new();
        assert!(!encoder.is_active());
        assert!(encoder.finish().is_empty());
    }

    #[test]
    fn runs_are_grouped() {
        let mut encoder = GeometryEncoder::new();
        encoder.move_to(2, 2);
        encoder.line_to(4, 2);
        encoder.line_to(4, 0);
        encoder.move_to(1, 1);
        encoder.line_to(2, 1);
        assert_eq!(encoder.position(), (2, 1));
        assert_eq!(
            encoder.finish(),
            vec![9, 4, 4, 18, 4, 0, 0, 3, 9, 5, 2, 10, 2, 0],
        );
    }

    #[test]
    fn close_path_has_no_coordinates() {
        let mut encoder = GeometryEncoder::new();
        encoder.move_to(0, 0);
        encoder.line_to(3, 0);
        encoder.line_to(3, 3);
        encoder.close_path();
        assert_eq!(encoder.finish(), vec![9, 0, 0, 18, 6, 0, 0, 6, 15]);
    }

    #[test]
    fn round_trip_reproduces_operations() {
        let ops = vec![
            (Command::MoveTo, 10, -4),
            (Command::LineTo, 4095, 0),
            (Command::LineTo, -300, 7),
            (Command::ClosePath, -300, 7),
            (Command::MoveTo, 10, 10),
            (Command::MoveTo, 11, 10),
            (Command::LineTo, 0, 0),
        ];
        let mut encoder = GeometryEncoder::new();
        for &(cmd, x, y) in &ops { encoder.emit(cmd, x, y) }
        assert_eq!(decode_geometry(&encoder.finish()).unwrap(), ops);
    }

    #[test]
    fn decode_rejects_bad_streams() {
        assert!(decode_geometry(&[Command::MoveTo.word(1), 0]).is_err());
        assert!(decode_geometry(&[(1 << CMD_BITS) | 5]).is_err());
        assert!(decode_geometry(&[]).unwrap().is_empty());
    }
}
