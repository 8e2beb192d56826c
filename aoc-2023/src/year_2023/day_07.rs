use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 7, tags = ["2023", "sorting"])]
pub struct Solver;

const CARDS: &[u8; 13] = b"23456789TJQKA";
const JOKER_RANK: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

#[derive(Debug, Clone, Copy)]
pub struct Hand {
    /// Card ranks, `0` for `2` up to `12` for `A`
    ranks: [u8; 5],
    bid: u64,
}

impl Hand {
    fn hand_type(&self, jokers: bool) -> HandType {
        let mut counts = [0u8; 13];
        for &rank in &self.ranks {
            counts[usize::from(rank)] += 1;
        }

        let wild = if jokers {
            std::mem::take(&mut counts[usize::from(JOKER_RANK)])
        } else {
            0
        };

        let mut groups: Vec<u8> = counts
            .into_iter()
            .filter(|&c| c > 0)
            .sorted_unstable_by(|a, b| b.cmp(a))
            .collect();
        // jokers join the largest group; five jokers form a group of their own
        match groups.first_mut() {
            Some(largest) => *largest += wild,
            None => groups.push(wild),
        }

        match groups.as_slice() {
            [5] => HandType::FiveOfAKind,
            [4, ..] => HandType::FourOfAKind,
            [3, 2] => HandType::FullHouse,
            [3, ..] => HandType::ThreeOfAKind,
            [2, 2, ..] => HandType::TwoPair,
            [2, ..] => HandType::OnePair,
            _ => HandType::HighCard,
        }
    }

    /// Sort key: type first, then card by card. Jokers tie-break as the weakest card.
    fn strength(&self, jokers: bool) -> (HandType, [u8; 5]) {
        let tie_break = self.ranks.map(|rank| match (jokers, rank) {
            (true, JOKER_RANK) => 0,
            (true, _) => rank + 1,
            (false, _) => rank,
        });
        (self.hand_type(jokers), tie_break)
    }
}

fn parse_hand(line: &str) -> anyhow::Result<Hand> {
    let (cards, bid) = line.split_once(' ').context("expected '<cards> <bid>'")?;
    let cards = cards.as_bytes();
    if cards.len() != 5 {
        bail!("hand must have 5 cards, got {}", cards.len());
    }

    let mut ranks = [0u8; 5];
    for (rank, &card) in ranks.iter_mut().zip(cards) {
        *rank = CARDS
            .iter()
            .position(|&c| c == card)
            .ok_or_else(|| anyhow!("unknown card {:?}", char::from(card)))? as u8;
    }

    let bid = bid.trim().parse::<u64>().with_context(|| format!("bad bid {bid:?}"))?;
    Ok(Hand { ranks, bid })
}

fn total_winnings(hands: &[Hand], jokers: bool) -> u64 {
    hands
        .iter()
        .sorted_by_cached_key(|hand| hand.strength(jokers))
        .zip(1u64..)
        .map(|(hand, rank)| hand.bid * rank)
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hand>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|l| !l.trim().is_empty())
            .enumerate()
            .map(|(idx, line)| {
                parse_hand(line.trim()).map_err(|e| anyhow!("(line {}) {}", idx + 1, e))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(ParseError::invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(shared, true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "32T3K 765
T55J5 684
KK677 28
KTJJT 220
QQQJA 483
";

    fn run(input: &str, part: u8) -> String {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part(&mut shared, part).unwrap()
    }

    fn hand_type(cards: &str, jokers: bool) -> HandType {
        parse_hand(&format!("{cards} 1")).unwrap().hand_type(jokers)
    }

    #[test]
    fn test_part_1_example() {
        assert_eq!(run(EXAMPLE, 1), "6440");
    }

    #[test]
    fn test_part_2_example() {
        assert_eq!(run(EXAMPLE, 2), "5905");
    }

    #[test]
    fn test_hand_types() {
        assert_eq!(hand_type("AAAAA", false), HandType::FiveOfAKind);
        assert_eq!(hand_type("23332", false), HandType::FullHouse);
        assert_eq!(hand_type("23432", false), HandType::TwoPair);
        assert_eq!(hand_type("23456", false), HandType::HighCard);
        assert_eq!(hand_type("KTJJT", false), HandType::TwoPair);
        assert_eq!(hand_type("KTJJT", true), HandType::FourOfAKind);
        assert_eq!(hand_type("JJJJJ", true), HandType::FiveOfAKind);
        assert_eq!(hand_type("2345J", true), HandType::OnePair);
    }

    #[test]
    fn test_joker_is_weakest_in_ties() {
        let joker = parse_hand("JKKK2 1").unwrap();
        let queen = parse_hand("QQQQ2 1").unwrap();
        assert!(joker.strength(true) < queen.strength(true));
        assert!(joker.strength(false) < queen.strength(false));
    }

    #[test]
    fn test_rejects_bad_hands() {
        assert!(Solver::parse("AAAA 1").is_err());
        assert!(Solver::parse("AAAAX 1").is_err());
        assert!(Solver::parse("AAAAA x").is_err());
    }
}
