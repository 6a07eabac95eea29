use crate::db::core::Floorplan;
use crate::geom::coord::GridCoord;
use anyhow::{Result, bail};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;

#[derive(Clone, Copy, Debug)]
pub struct GeneratorParams {
    pub cols: u32,
    pub rows: u32,
    pub blockages: usize,
    pub nets: usize,
    pub max_targets: usize,
    pub seed: u64,
}

/// Random benchmark: every blockage and pin sits on its own tile.
pub fn generate_random_floorplan(params: &GeneratorParams) -> Result<Floorplan> {
    let max_targets = params.max_targets.max(1);
    let tiles = params.cols as usize * params.rows as usize;
    let worst_case = params.blockages + params.nets * (1 + max_targets);
    if worst_case > tiles {
        bail!(
            "{} blockages and {} nets of up to {} targets do not fit on a {}x{} grid",
            params.blockages,
            params.nets,
            max_targets,
            params.cols,
            params.rows
        );
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut free: Vec<GridCoord> = (0..params.rows)
        .flat_map(|y| (0..params.cols).map(move |x| GridCoord::new(x, y)))
        .collect();
    free.shuffle(&mut rng);
    let mut take = || free.pop().expect("tile budget checked above");

    let mut fp = Floorplan::new(params.cols, params.rows);
    for _ in 0..params.blockages {
        fp.add_blockage(take());
    }
    for _ in 0..params.nets {
        let source = take();
        let count = rng.gen_range(1..=max_targets);
        let targets = (0..count).map(|_| take()).collect();
        fp.add_net(source, targets);
    }

    log::info!(
        "Generated floorplan {}x{}: {} blockages, {} nets (seed {})",
        fp.cols,
        fp.rows,
        fp.blockages.len(),
        fp.num_nets(),
        params.seed
    );
    Ok(fp)
}

pub fn to_infile_string(fp: &Floorplan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", fp.cols, fp.rows);
    let _ = writeln!(out, "{}", fp.blockages.len());
    for b in &fp.blockages {
        let _ = writeln!(out, "{} {}", b.x, b.y);
    }
    let _ = writeln!(out, "{}", fp.num_nets());
    for net in &fp.nets {
        let _ = write!(out, "{}", net.targets.len() + 1);
        for p in net.pins() {
            let _ = write!(out, " {} {}", p.x, p.y);
        }
        out.push('\n');
    }
    out
}

pub fn write_infile(fp: &Floorplan, filename: &str) -> std::io::Result<()> {
    let mut file = File::create(filename)?;
    file.write_all(to_infile_string(fp).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::parser::infile;
    use std::collections::HashSet;

    fn params(seed: u64) -> GeneratorParams {
        GeneratorParams {
            cols: 12,
            rows: 10,
            blockages: 15,
            nets: 6,
            max_targets: 3,
            seed,
        }
    }

    #[test]
    fn generated_tiles_are_distinct_and_in_bounds() {
        let fp = generate_random_floorplan(&params(7)).unwrap();
        let mut seen = HashSet::new();
        for c in fp.blockages.iter().copied().chain(fp.nets.iter().flat_map(|n| n.pins())) {
            assert!(fp.in_bounds(c));
            assert!(seen.insert(c), "tile {} used twice", c);
        }
        assert_eq!(fp.num_nets(), 6);
        assert!(fp.nets.iter().all(|n| (1..=3).contains(&n.targets.len())));
    }

    #[test]
    fn same_seed_same_floorplan() {
        let a = generate_random_floorplan(&params(42)).unwrap();
        let b = generate_random_floorplan(&params(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn written_text_parses_back() {
        let fp = generate_random_floorplan(&params(3)).unwrap();
        let parsed = infile::parse_str(&to_infile_string(&fp)).unwrap();
        assert_eq!(parsed, fp);
    }

    #[test]
    fn net_lines_count_the_source() {
        let mut fp = Floorplan::new(4, 4);
        fp.add_net(GridCoord::new(0, 0), vec![GridCoord::new(3, 3), GridCoord::new(0, 3)]);
        let text = to_infile_string(&fp);
        assert_eq!(text.lines().last(), Some("3 0 0 3 3 0 3"));
    }

    #[test]
    fn refuses_overfull_grid() {
        let mut p = params(1);
        p.cols = 3;
        p.rows = 3;
        assert!(generate_random_floorplan(&p).is_err());
    }
}
