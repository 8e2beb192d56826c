use std::collections::HashMap;
use std::ops::Range;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::interval_tree::IntervalTree;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 5, tags = ["2023", "ranges"])]
pub struct Solver;

const START_CATEGORY: &str = "seed";
const END_CATEGORY: &str = "location";

/// One `x-to-y map` block. Source intervals map to `dest_start` onwards.
#[derive(Debug)]
pub struct AlmanacMap<'a> {
    dest_category: &'a str,
    entries: IntervalTree<u64>,
}

impl AlmanacMap<'_> {
    fn map_value(&self, value: u64) -> u64 {
        match self.entries.search_entry(value) {
            Some((src, &dest_start)) => dest_start + (value - src.start),
            None => value,
        }
    }

    /// Image of `range`, split at entry boundaries. Uncovered parts map to themselves.
    fn map_range(&self, range: Range<u64>, out: &mut Vec<Range<u64>>) {
        let mut cursor = range.start;
        for (src, &dest_start) in self.entries.overlapping(range.clone()) {
            if cursor < src.start {
                out.push(cursor..src.start);
                cursor = src.start;
            }
            let end = src.end.min(range.end);
            let shift = cursor - src.start;
            out.push(dest_start + shift..dest_start + shift + (end - cursor));
            cursor = end;
        }
        if cursor < range.end {
            out.push(cursor..range.end);
        }
    }
}

#[derive(Debug)]
pub struct Almanac<'a> {
    seeds: Vec<u64>,
    maps: HashMap<&'a str, AlmanacMap<'a>>,
}

impl<'a> Almanac<'a> {
    /// Maps from `seed` to `location`, following the category chain.
    fn chain(&self) -> anyhow::Result<Vec<&AlmanacMap<'a>>> {
        let mut chain = Vec::new();
        let mut category = START_CATEGORY;
        while category != END_CATEGORY {
            if chain.len() > self.maps.len() {
                bail!("category chain from {START_CATEGORY} loops");
            }
            let map = self
                .maps
                .get(category)
                .ok_or_else(|| anyhow!("no map from category {category:?}"))?;
            chain.push(map);
            category = map.dest_category;
        }
        Ok(chain)
    }
}

fn parse_numbers(s: &str) -> anyhow::Result<Vec<u64>> {
    s.split_whitespace()
        .map(|n| n.parse::<u64>().with_context(|| format!("bad number {n:?}")))
        .collect()
}

fn parse_map<'a>(header: &'a str, lines: &[&str]) -> anyhow::Result<(&'a str, AlmanacMap<'a>)> {
    let name = header
        .strip_suffix("map:")
        .with_context(|| format!("bad map header {header:?}"))?
        .trim();
    let (src, dest) = name
        .split_once("-to-")
        .with_context(|| format!("bad map name {name:?}"))?;

    let mut entries = IntervalTree::new();
    for line in lines {
        let &[dest_start, src_start, len] = parse_numbers(line)?.as_slice() else {
            bail!("map entry needs 3 numbers: {line:?}");
        };
        entries
            .insert(src_start..src_start + len, dest_start)
            .with_context(|| format!("in {name} map"))?;
    }

    Ok((
        src,
        AlmanacMap {
            dest_category: dest,
            entries,
        },
    ))
}

fn parse_almanac(input: &str) -> anyhow::Result<Almanac<'_>> {
    let chunks = input.lines().map(str::trim).chunk_by(|line| line.is_empty());
    let mut blocks = chunks
        .into_iter()
        .filter(|(empty, _)| !empty)
        .map(|(_, block)| block.collect_vec());

    let seeds_block = blocks.next().context("missing seeds")?;
    let seeds = seeds_block
        .first()
        .and_then(|line| line.strip_prefix("seeds:"))
        .context("first block must be 'seeds: ...'")?;
    let seeds = parse_numbers(seeds)?;

    let mut maps = HashMap::new();
    for block in blocks {
        let (src, map) = parse_map(block[0], &block[1..])?;
        if maps.insert(src, map).is_some() {
            bail!("duplicate map from category {src:?}");
        }
    }

    Ok(Almanac { seeds, maps })
}

impl AocParser for Solver {
    type SharedData<'a> = Almanac<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_almanac(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let chain = shared.chain().map_err(SolveError::failed)?;
        shared
            .seeds
            .iter()
            .map(|&seed| chain.iter().fold(seed, |value, map| map.map_value(value)))
            .min()
            .map(|location| location.to_string())
            .ok_or_else(|| SolveError::failed("no seeds"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let chain = shared.chain().map_err(SolveError::failed)?;
        if shared.seeds.len() % 2 != 0 {
            return Err(SolveError::failed("seed ranges need (start, length) pairs"));
        }

        let mut ranges: Vec<Range<u64>> = shared
            .seeds
            .chunks_exact(2)
            .map(|pair| pair[0]..pair[0] + pair[1])
            .filter(|r| !r.is_empty())
            .collect();

        for map in chain {
            let mut next = Vec::with_capacity(ranges.len());
            for range in ranges {
                map.map_range(range, &mut next);
            }
            ranges = next;
        }

        ranges
            .iter()
            .map(|r| r.start)
            .min()
            .map(|location| location.to_string())
            .ok_or_else(|| SolveError::failed("no seed ranges"))
    }
}
