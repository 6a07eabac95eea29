use crate::db::core::Floorplan;
use crate::geom::coord::GridCoord;
use anyhow::{Context, Result, anyhow, bail};
use std::fs::File;
use std::io::{BufRead, BufReader};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    GridSize,
    BlockageCount,
    Blockages { remaining: usize },
    NetCount,
    Nets { remaining: usize },
    Done,
}

pub fn parse(filename: &str) -> Result<Floorplan> {
    let file = File::open(filename).with_context(|| format!("cannot open {}", filename))?;
    parse_reader(BufReader::new(file))
}

pub fn parse_str(text: &str) -> Result<Floorplan> {
    parse_reader(text.as_bytes())
}

/// Reads the floorplan format: grid size, blockage count, one blockage per
/// line, net count, then one `k sx sy t1x t1y ..` line per net where `k`
/// counts every pin, source included.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Floorplan> {
    let mut fp = Floorplan::default();
    let mut section = Section::GridSize;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let values = tokens(&line, line_no)?;
        if values.is_empty() {
            continue;
        }

        section = match section {
            Section::GridSize => {
                expect_len(&values, 2, line_no)?;
                if values[0] == 0 || values[1] == 0 {
                    bail!("line {}: grid dimensions must be non-zero", line_no);
                }
                fp = Floorplan::new(values[0], values[1]);
                log::debug!("Floorplan grid: {}x{}", fp.cols, fp.rows);
                Section::BlockageCount
            }
            Section::BlockageCount => {
                expect_len(&values, 1, line_no)?;
                match values[0] as usize {
                    0 => Section::NetCount,
                    n => Section::Blockages { remaining: n },
                }
            }
            Section::Blockages { remaining } => {
                expect_len(&values, 2, line_no)?;
                let at = coord(&fp, values[0], values[1], line_no)?;
                fp.add_blockage(at);
                if remaining == 1 {
                    Section::NetCount
                } else {
                    Section::Blockages {
                        remaining: remaining - 1,
                    }
                }
            }
            Section::NetCount => {
                expect_len(&values, 1, line_no)?;
                match values[0] as usize {
                    0 => Section::Done,
                    n => {
                        fp.nets.reserve(n);
                        Section::Nets { remaining: n }
                    }
                }
            }
            Section::Nets { remaining } => {
                let pins = values[0] as usize;
                if pins < 2 {
                    bail!("line {}: a net needs a source and at least one target", line_no);
                }
                expect_len(&values, 1 + 2 * pins, line_no)?;
                let source = coord(&fp, values[1], values[2], line_no)?;
                let sinks = values[3..]
                    .chunks_exact(2)
                    .map(|xy| coord(&fp, xy[0], xy[1], line_no))
                    .collect::<Result<Vec<_>>>()?;
                fp.add_net(source, sinks);
                if remaining == 1 {
                    Section::Done
                } else {
                    Section::Nets {
                        remaining: remaining - 1,
                    }
                }
            }
            Section::Done => bail!("line {}: extra line after the last net", line_no),
        };
    }

    match section {
        Section::Done => Ok(fp),
        Section::GridSize => Err(anyhow!("empty floorplan file")),
        other => Err(anyhow!("unexpected end of file while reading {:?}", other)),
    }
}

fn tokens(line: &str, line_no: usize) -> Result<Vec<u32>> {
    line.split_whitespace()
        .map(|t| {
            t.parse::<u32>()
                .map_err(|_| anyhow!("line {}: '{}' is not a non-negative integer", line_no, t))
        })
        .collect()
}

fn expect_len(values: &[u32], n: usize, line_no: usize) -> Result<()> {
    if values.len() != n {
        bail!(
            "line {}: expected {} integers, found {}",
            line_no,
            n,
            values.len()
        );
    }
    Ok(())
}

fn coord(fp: &Floorplan, x: u32, y: u32, line_no: usize) -> Result<GridCoord> {
    let at = GridCoord::new(x, y);
    if !fp.in_bounds(at) {
        bail!(
            "line {}: {} lies outside the {}x{} grid",
            line_no,
            at,
            fp.cols,
            fp.rows
        );
    }
    Ok(at)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "5 5\n1\n2 2\n2\n2 0 2 4 2\n\n3 0 0 4 4 0 4\n";

    #[test]
    fn parses_grid_blockages_and_nets() {
        let fp = parse_str(SAMPLE).unwrap();
        assert_eq!((fp.cols, fp.rows), (5, 5));
        assert_eq!(fp.blockages, vec![GridCoord::new(2, 2)]);
        assert_eq!(fp.num_nets(), 2);
        assert_eq!(fp.nets[0].source, GridCoord::new(0, 2));
        assert_eq!(fp.nets[0].targets, vec![GridCoord::new(4, 2)]);
        assert_eq!(
            fp.nets[1].targets,
            vec![GridCoord::new(4, 4), GridCoord::new(0, 4)]
        );
    }

    #[test]
    fn zero_blockages_goes_straight_to_nets() {
        let fp = parse_str("3 3\n0\n1\n2 0 0 2 2\n").unwrap();
        assert!(fp.blockages.is_empty());
        assert_eq!(fp.num_nets(), 1);
    }

    #[test]
    fn rejects_wrong_token_count() {
        let err = parse_str("3 3\n0\n1\n3 0 0 2 2\n").unwrap_err();
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn pin_count_includes_the_source() {
        let fp = parse_str("5 5\n0\n1\n3 0 0 4 4 0 4\n").unwrap();
        assert_eq!(fp.nets[0].source, GridCoord::new(0, 0));
        assert_eq!(fp.nets[0].targets.len(), 2);
    }

    #[test]
    fn rejects_net_without_target() {
        let err = parse_str("3 3\n0\n1\n1 0 0\n").unwrap_err();
        assert!(err.to_string().contains("at least one target"));
    }

    #[test]
    fn rejects_out_of_bounds_pin() {
        let err = parse_str("3 3\n0\n1\n2 0 0 3 0\n").unwrap_err();
        assert!(err.to_string().contains("outside"));
    }

    #[test]
    fn rejects_extra_lines() {
        assert!(parse_str("3 3\n0\n1\n2 0 0 2 2\n1 1\n").is_err());
    }

    #[test]
    fn rejects_negative_or_text_tokens() {
        assert!(parse_str("3 x\n").is_err());
        assert!(parse_str("3 3\n-1\n").is_err());
    }

    #[test]
    fn rejects_truncated_file() {
        assert!(parse_str("3 3\n2\n0 0\n").is_err());
        assert!(parse_str("").is_err());
    }
}
