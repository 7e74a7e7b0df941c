use ccitt_engine::compression;
use fax_strip::{
    Bilevel, ByteBudgetMode, ChunkFeeder, DecodeError, FeedStatus, Outcome, Raster, RowPlacement,
    StreamConfig, StripDecoder,
};

/// Pack a string of `0` and `1` (whitespace is ignored) into bytes, MSB first
fn bits(input: &str) -> Vec<u8> {
    let mut out = vec![];
    for (i, c) in input.chars().filter(|c| !c.is_whitespace()).enumerate() {
        if i % 8 == 0 {
            out.push(0);
        }
        if c == '1' {
            *out.last_mut().unwrap() |= 0x80 >> (i % 8);
        }
    }
    out
}

struct Vector {
    config: StreamConfig,
    input: Vec<u8>,
    rows: Vec<[u8; 8]>,
}

const W: u8 = 0xFF;
const B: u8 = 0x00;

fn vectors() -> Vec<Vector> {
    vec![
        // W4 B4 | W2 B6 | W8, byte aligned, one byte of padding
        Vector {
            config: StreamConfig::new(compression::CCITT_RLE, 8, 3),
            input: vec![0b1011_0110, 0b0111_0010, 0b1001_1000, 0x00],
            rows: vec![
                [W, W, W, W, B, B, B, B],
                [W, W, B, B, B, B, B, B],
                [W; 8],
            ],
        },
        // H W2 B4, V0 | V0 V0 V0 | EOFB
        Vector {
            config: StreamConfig::new(compression::CCITT_FAX4, 8, 2),
            input: bits("001 0111 011 1  1 1 1  000000000001 000000000001"),
            rows: vec![[W, W, B, B, B, B, W, W], [W, W, B, B, B, B, W, W]],
        },
        // EOL W4 B4 | EOL W8 | RTC
        Vector {
            config: StreamConfig::new(compression::CCITT_FAX3, 8, 2),
            input: bits(
                "000000000001 1011 011  000000000001 10011
                 000000000001 000000000001 000000000001",
            ),
            rows: vec![[W, W, W, W, B, B, B, B], [W; 8]],
        },
    ]
}

fn raster_for(config: &StreamConfig) -> Raster {
    Raster::new(config.width, config.height, 1, 0x55)
}

fn check_rows(raster: &Raster, rows: &[[u8; 8]]) {
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(raster.row(y as u32), row, "row {}", y);
    }
}

#[test]
fn single_call() {
    for v in vectors() {
        let mut decoder = StripDecoder::new(&v.config, Bilevel::default()).unwrap();
        let mut raster = raster_for(&v.config);
        assert_eq!(decoder.decode(&v.input, &mut raster), Ok(Outcome::Done));
        check_rows(&raster, &v.rows);
    }
}

#[test]
fn bounded_single_call() {
    for v in vectors() {
        let config = v.config.clone().with_budget(ByteBudgetMode::Bounded(v.input.len()));
        let mut decoder = StripDecoder::new(&config, Bilevel::default()).unwrap();
        let mut raster = raster_for(&config);
        assert_eq!(decoder.decode(&v.input, &mut raster), Ok(Outcome::Done));
        check_rows(&raster, &v.rows);
    }
}

#[test]
fn every_split_point() {
    for v in vectors() {
        let mut whole = raster_for(&v.config);
        StripDecoder::new(&v.config, Bilevel::default())
            .unwrap()
            .decode(&v.input, &mut whole)
            .unwrap();

        for split in 0..=v.input.len() {
            let mut decoder = StripDecoder::new(&v.config, Bilevel::default()).unwrap();
            let mut raster = raster_for(&v.config);
            match decoder.decode(&v.input[..split], &mut raster).unwrap() {
                Outcome::Done => {}
                Outcome::NeedMoreInput(consumed) => {
                    assert!(consumed <= split);
                    let rest = decoder.decode(&v.input[consumed..], &mut raster);
                    assert_eq!(rest, Ok(Outcome::Done), "split at {}", split);
                }
            }
            assert_eq!(raster, whole, "split at {}", split);
        }
    }
}

#[test]
fn byte_by_byte() {
    for v in vectors() {
        let mut decoder = StripDecoder::new(&v.config, Bilevel::default()).unwrap();
        let mut raster = raster_for(&v.config);
        let mut feeder = ChunkFeeder::new();
        let mut status = FeedStatus::Pending { buffered: 0 };
        for byte in &v.input {
            status = feeder.feed(&mut decoder, &mut raster, &[*byte]).unwrap();
        }
        assert_eq!(status, FeedStatus::Done);
        feeder.finish(&decoder).unwrap();
        check_rows(&raster, &v.rows);
    }
}

#[test]
fn bounded_precondition() {
    let config = StreamConfig::new(compression::CCITT_FAX4, 1728, 1)
        .with_budget(ByteBudgetMode::Bounded(5));
    let mut decoder = StripDecoder::new(&config, Bilevel::default()).unwrap();
    let mut raster = Raster::new(1728, 1, 1, 0x55);
    let result = decoder.decode(&[0xFF; 4], &mut raster);
    assert_eq!(
        result,
        Err(DecodeError::InsufficientInput {
            needed: 5,
            available: 4
        })
    );
    assert!(!decoder.engine().is_setup());
    assert_eq!(decoder.rows(), 0);
    assert!(raster.as_bytes().iter().all(|&b| b == 0x55));
}

#[test]
fn partial_row_is_not_written() {
    // (W2 B3) x 5, W1703: 44 bits
    let mut input = bits("0111 10  0111 10  0111 10  0111 10  0111 10  011000 00101000");
    assert_eq!(input.len(), 6);
    input.push(0x00);

    let config = StreamConfig::new(compression::CCITT_RLE, 1728, 1);
    let mut decoder = StripDecoder::new(&config, Counting::default()).unwrap();
    let mut raster = Raster::new(1728, 1, 1, 0x55);

    assert_eq!(
        decoder.decode(&input[..3], &mut raster),
        Ok(Outcome::NeedMoreInput(0))
    );
    assert_eq!(decoder.placement().rows.len(), 0);
    assert!(raster.as_bytes().iter().all(|&b| b == 0x55));

    assert_eq!(decoder.decode(&input, &mut raster), Ok(Outcome::Done));
    assert_eq!(decoder.placement().rows, vec![1728]);

    let mut whole = Raster::new(1728, 1, 1, 0x55);
    StripDecoder::new(&config, Counting::default())
        .unwrap()
        .decode(&input, &mut whole)
        .unwrap();
    assert_eq!(raster, whole);
    assert_eq!(raster.row(0)[..5], [0xFF, 0xFF, 0x00, 0x00, 0x00]);
    assert_eq!(raster.row(0)[25..], [0xFF; 1703]);
}

#[test]
fn done_is_terminal() {
    let v = &vectors()[0];
    let mut decoder = StripDecoder::new(&v.config, Bilevel::default()).unwrap();
    let mut raster = raster_for(&v.config);
    assert_eq!(decoder.decode(&v.input, &mut raster), Ok(Outcome::Done));
    let before = raster.clone();
    assert_eq!(decoder.decode(&[0x00; 4], &mut raster), Ok(Outcome::Done));
    assert_eq!(decoder.decode(&[], &mut raster), Ok(Outcome::Done));
    assert_eq!(raster, before);
}

#[test]
fn rows_are_placed_once() {
    for v in vectors() {
        let mut decoder = StripDecoder::new(&v.config, Counting::default()).unwrap();
        let mut raster = raster_for(&v.config);
        let mut feeder = ChunkFeeder::new();
        for chunk in v.input.chunks(2) {
            feeder.feed(&mut decoder, &mut raster, chunk).unwrap();
        }
        let expected = vec![v.config.width as usize; v.config.height as usize];
        assert_eq!(decoder.placement().rows, expected);
    }
}

#[test]
fn placement_sees_the_offset_window() {
    let v = &vectors()[1];
    let config = v.config.clone().with_offset(3, 2);
    let mut decoder = StripDecoder::new(&config, Counting::default()).unwrap();
    let mut raster = Raster::new(16, 5, 1, 0x55);
    assert_eq!(decoder.decode(&v.input, &mut raster), Ok(Outcome::Done));
    assert_eq!(decoder.placement().rows, vec![8, 8]);
    assert_eq!(raster.row(1), &[0x55; 16]);
    assert_eq!(raster.row(2)[..3], [0x55; 3]);
    assert_eq!(raster.row(2)[3..11], v.rows[0]);
    assert_eq!(raster.row(2)[11..], [0x55; 5]);
    assert_eq!(raster.row(4), &[0x55; 16]);
}

/// Records the length of every destination window
#[derive(Default)]
struct Counting {
    rows: Vec<usize>,
    inner: Bilevel,
}

impl RowPlacement for Counting {
    fn place_row(&mut self, dst: &mut [u8], src: &[u8], pixels: usize) {
        assert_eq!(dst.len(), pixels);
        self.rows.push(dst.len());
        self.inner.place_row(dst, src, pixels);
    }
}
