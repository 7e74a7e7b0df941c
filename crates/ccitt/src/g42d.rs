//! # CCITT Group 4 2D-encoding
//!
//! Spec: ITU-T Recommendation T.6 (11/88) <https://www.itu.int/rec/T-REC-T.6-198811-I/en>
//!
//! Changing elements are addressed with 1-based positions (see
//! [`ColorLine`]), so `a0 == 0` is the imaginary white element in front of
//! the row and `width + 1` is the imaginary element behind it.

use crate::{
    codec::{DecodeState, FaxCodec, FieldInfo, RowContext},
    line::{ColorLine, Line, RunLines},
    Color, EngineConfig, FaxError, FaxResult,
};

const FAX4_FIELDS: &[FieldInfo] = &[
    FieldInfo { tag: 293, name: "Group4Options" },
    FieldInfo { tag: 326, name: "BadFaxLines" },
    FieldInfo { tag: 327, name: "CleanFaxData" },
    FieldInfo { tag: 328, name: "ConsecutiveBadFaxLines" },
    FieldInfo { tag: 34908, name: "FaxRecvParams" },
    FieldInfo { tag: 34909, name: "FaxSubAddress" },
    FieldInfo { tag: 34910, name: "FaxRecvTime" },
    FieldInfo { tag: 34911, name: "FaxDcs" },
];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ModeCode {
    Pass,
    Horizontal,
    /// a1 relative to b1
    Vertical(i8),
}

fn read_mode(cx: &mut RowContext<'_, '_>) -> FaxResult<ModeCode> {
    use ModeCode::*;
    let mode = if cx.bit()? {
        // 1 --> V(0) --> a_1 just under b_1
        Vertical(0)
    } else if cx.bit()? {
        // 01
        if cx.bit()? {
            // 011 --> V_R(1) --> a_1 is 1 right of b_1
            Vertical(1)
        } else {
            // 010 --> V_L(1) --> a_1 is 1 left of b_1
            Vertical(-1)
        }
    } else if cx.bit()? {
        // 001
        Horizontal
    } else if cx.bit()? {
        // 0001
        Pass
    } else if cx.bit()? {
        // 00001
        if cx.bit()? {
            Vertical(2) // 000011
        } else {
            Vertical(-2) // 000010
        }
    } else if cx.bit()? {
        // 000001
        if cx.bit()? {
            Vertical(3) // 0000011
        } else {
            Vertical(-3) // 0000010
        }
    } else if cx.bit()? {
        // 0000001xxx
        let mut ext = 0;
        for _ in 0..3 {
            ext = (ext << 1) | u8::from(cx.bit()?);
        }
        return Err(FaxError::UnsupportedExtension(ext));
    } else {
        // 0000000, the start of an EOL
        return Err(FaxError::EndOfBlock);
    };
    Ok(mode)
}

struct Coder<'r> {
    reference: &'r Line,
    current: &'r mut Line,
    width: usize,
    color: Color,
    a0: usize,
}

impl Coder<'_> {
    fn find_b1(&self) -> usize {
        let mut ref_color = self.reference.color_at(self.a0);
        for i in (self.a0 + 1)..=self.width {
            let i_color = self.reference.color_at(i);
            if i_color != ref_color {
                // changing element
                if i_color != self.color {
                    return i;
                } else {
                    ref_color = i_color;
                }
            }
        }
        self.width + 1
    }

    fn find_b2(&self) -> usize {
        let b1 = self.find_b1();
        if b1 > self.width {
            return b1;
        }
        let ref_color = self.reference.color_at(b1);
        for i in (b1 + 1)..=self.width {
            if self.reference.color_at(i) != ref_color {
                // changing element
                return i;
            }
        }
        self.width + 1
    }

    fn check(&self, pos: usize) -> FaxResult<()> {
        if pos > self.width + 1 {
            return Err(FaxError::RowOverrun {
                pos,
                width: self.width,
            });
        }
        Ok(())
    }

    fn pass_mode(&mut self) {
        let b2 = self.find_b2();
        self.current.fill(self.a0, b2, self.color);
        self.a0 = b2;
    }

    fn vertical_mode(&mut self, delta: i8) -> FaxResult<()> {
        let b1 = self.find_b1();
        let a1 = b1 as isize + isize::from(delta);
        if a1 < self.a0 as isize {
            return Err(FaxError::NegativeRun {
                a0: self.a0,
                a1: a1.max(0) as usize,
            });
        }
        let a1 = a1 as usize;
        self.check(a1)?;
        self.current.fill(self.a0, a1, self.color);
        self.color.invert();
        self.a0 = a1;
        Ok(())
    }

    fn horizontal_mode(&mut self, a0a1: usize, a1a2: usize) -> FaxResult<()> {
        // the imaginary element in front of the row is not part of the first run
        let a1 = self.a0.max(1) + a0a1;
        let a2 = a1 + a1a2;
        self.check(a2)?;
        self.current.fill(self.a0, a1, self.color);
        self.current.fill(a1, a2, !self.color);
        self.a0 = a2;
        Ok(())
    }
}

/// Decode a line of 2-d encoded bi-level image data against `reference`
pub(crate) fn decode_2d_row(
    cx: &mut RowContext<'_, '_>,
    reference: &Line,
    current: &mut Line,
) -> FaxResult<()> {
    let width = current.width();
    let mut coder = Coder {
        reference,
        current,
        width,
        color: Color::White,
        a0: 0,
    };
    while coder.a0 <= width {
        match read_mode(cx)? {
            ModeCode::Pass => coder.pass_mode(),
            ModeCode::Vertical(delta) => coder.vertical_mode(delta)?,
            ModeCode::Horizontal => {
                let a0a1 = cx.run(coder.color)?;
                let a1a2 = cx.run(!coder.color)?;
                coder.horizontal_mode(a0a1, a1a2)?;
            }
        }
    }
    Ok(())
}

/// T.6 rows, the first one coded against an all-white line
pub(crate) struct Group4 {
    lines: RunLines,
}

impl Group4 {
    pub fn new() -> Self {
        Self {
            lines: RunLines::new(0),
        }
    }
}

impl FaxCodec for Group4 {
    fn name(&self) -> &'static str {
        "CCITT Group 4"
    }

    fn fields(&self) -> &'static [FieldInfo] {
        FAX4_FIELDS
    }

    fn setup_decode(&mut self, config: &EngineConfig) -> FaxResult<()> {
        if config.image_width == 0 {
            return Err(FaxError::InvalidWidth(config.image_width));
        }
        self.lines = RunLines::new(config.image_width as usize);
        Ok(())
    }

    fn pre_decode(&mut self, state: &mut DecodeState) -> FaxResult<()> {
        *state = DecodeState::default();
        self.lines.reset();
        Ok(())
    }

    fn decode_row(&mut self, cx: &mut RowContext<'_, '_>, dst: &mut [u8]) -> FaxResult<()> {
        let (reference, current) = self.lines.split(cx.state.reference);
        decode_2d_row(cx, reference, current)?;
        current.pack(dst);
        cx.state.swap_lines();
        cx.state.rows += 1;
        Ok(())
    }

    fn cleanup(&mut self) {
        self.lines = RunLines::new(0);
    }
}
