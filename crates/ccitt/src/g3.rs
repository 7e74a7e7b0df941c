//! # CCITT Group 3 / Modified Huffman
//!
//! Spec: ITU-T Recommendation T.4 (07/03) <https://www.itu.int/rec/T-REC-T.4-200307-I/en>

use crate::{
    codec::{DecodeState, FaxCodec, FieldInfo, RowContext},
    g42d::decode_2d_row,
    line::{Line, RunLines},
    Color, EngineConfig, FaxError, FaxResult, Group3Options,
};

/// Tags shared by all fax codecs
const FAX_FIELDS: &[FieldInfo] = &[
    FieldInfo { tag: 326, name: "BadFaxLines" },
    FieldInfo { tag: 327, name: "CleanFaxData" },
    FieldInfo { tag: 328, name: "ConsecutiveBadFaxLines" },
    FieldInfo { tag: 34908, name: "FaxRecvParams" },
    FieldInfo { tag: 34909, name: "FaxSubAddress" },
    FieldInfo { tag: 34910, name: "FaxRecvTime" },
    FieldInfo { tag: 34911, name: "FaxDcs" },
];

const FAX3_FIELDS: &[FieldInfo] = &[
    FieldInfo { tag: 292, name: "Group3Options" },
    FieldInfo { tag: 326, name: "BadFaxLines" },
    FieldInfo { tag: 327, name: "CleanFaxData" },
    FieldInfo { tag: 328, name: "ConsecutiveBadFaxLines" },
    FieldInfo { tag: 34908, name: "FaxRecvParams" },
    FieldInfo { tag: 34909, name: "FaxSubAddress" },
    FieldInfo { tag: 34910, name: "FaxRecvTime" },
    FieldInfo { tag: 34911, name: "FaxDcs" },
];

/// EOL is eleven or more zeros followed by a one
const EOL_ZEROS: u32 = 11;

/// Decode a line of 1-d encoded bi-level image data
pub(crate) fn decode_1d_row(cx: &mut RowContext<'_, '_>, line: &mut Line) -> FaxResult<()> {
    let width = line.width();
    let mut color = Color::White;
    let mut a0 = 0;

    while a0 < width {
        let run = cx.run(color)?;
        let end = a0 + run;
        if end > width {
            return Err(FaxError::RowOverrun { pos: end, width });
        }
        line.fill_pixels(a0, end, color);
        a0 = end;
        color.invert();
    }
    Ok(())
}

/// Consume everything up to and including the next EOL
fn sync_eol(cx: &mut RowContext<'_, '_>, module: &str) -> FaxResult<()> {
    let mut zeros = 0;
    let mut skipped = 0;
    loop {
        if cx.bit()? {
            if zeros >= EOL_ZEROS {
                break;
            }
            skipped += zeros + 1;
            zeros = 0;
        } else {
            zeros += 1;
        }
    }
    if skipped > 0 {
        cx.diagnostics.warning(
            module,
            format_args!("{} bits of garbage before EOL of row {}", skipped, cx.row),
        );
    }
    cx.state.eols += 1;
    Ok(())
}

/// How rows are padded in a Modified Huffman strip
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Alignment {
    /// Every row starts on a byte boundary (`CCITT RLE`)
    Byte,
    /// Every row starts on a 16-bit boundary (`CCITT RLEW`)
    Word,
}

/// 1-D rows without EOL codes
pub(crate) struct ModifiedHuffman {
    name: &'static str,
    alignment: Alignment,
    line: Line,
}

impl ModifiedHuffman {
    pub fn new(name: &'static str, alignment: Alignment) -> Self {
        Self {
            name,
            alignment,
            line: Line::new(0),
        }
    }
}

impl FaxCodec for ModifiedHuffman {
    fn name(&self) -> &'static str {
        self.name
    }

    fn fields(&self) -> &'static [FieldInfo] {
        FAX_FIELDS
    }

    fn setup_decode(&mut self, config: &EngineConfig) -> FaxResult<()> {
        if config.image_width == 0 {
            return Err(FaxError::InvalidWidth(config.image_width));
        }
        self.line = Line::new(config.image_width as usize);
        Ok(())
    }

    fn pre_decode(&mut self, state: &mut DecodeState) -> FaxResult<()> {
        *state = DecodeState::default();
        Ok(())
    }

    fn decode_row(&mut self, cx: &mut RowContext<'_, '_>, dst: &mut [u8]) -> FaxResult<()> {
        decode_1d_row(cx, &mut self.line)?;
        match self.alignment {
            Alignment::Byte => cx.align_byte(),
            Alignment::Word => cx.align_word()?,
        }
        self.line.pack(dst);
        cx.state.rows += 1;
        Ok(())
    }

    fn cleanup(&mut self) {
        self.line = Line::new(0);
    }
}

/// T.4 rows, each introduced by an EOL
pub(crate) struct Group3 {
    options: Group3Options,
    lines: RunLines,
}

impl Group3 {
    pub fn new(options: Group3Options) -> Self {
        Self {
            options,
            lines: RunLines::new(0),
        }
    }
}

impl FaxCodec for Group3 {
    fn name(&self) -> &'static str {
        "CCITT Group 3"
    }

    fn fields(&self) -> &'static [FieldInfo] {
        FAX3_FIELDS
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
        sync_eol(cx, self.name())?;
        let is_1d = if self.options.contains(Group3Options::TWO_D_ENCODING) {
            cx.bit()?
        } else {
            true
        };
        let (reference, current) = self.lines.split(cx.state.reference);
        if is_1d {
            decode_1d_row(cx, current)?;
        } else {
            decode_2d_row(cx, reference, current)?;
        }
        current.pack(dst);
        cx.state.swap_lines();
        cx.state.rows += 1;
        Ok(())
    }

    fn cleanup(&mut self) {
        self.lines = RunLines::new(0);
    }
}
