use super::card::Card;
use super::rank::Rank;
use super::suit::Suit;

/// Comparable hand strength. Higher wins.
pub type Score = u32;

/// Hand evaluation is consumed as an opaque function at showdown:
/// two hole cards plus the board in, a comparable score out.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, hand: &[Card], board: &[Card]) -> Score;
}

/// Hand category, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOAK = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOAK = 7,
    StraightFlush = 8,
}

/// Best-five-of-seven evaluator over rank counts and per-suit rank masks.
///
/// The score packs the category into the high bits and up to five
/// tie-breaking ranks, most significant first, four bits each below it.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ranker;

impl Evaluator for Ranker {
    fn evaluate(&self, hand: &[Card], board: &[Card]) -> Score {
        let cards = hand.iter().chain(board.iter()).copied().collect::<Vec<_>>();
        let (category, kicks) = Self::classify(&cards);
        kicks
            .iter()
            .take(5)
            .enumerate()
            .map(|(i, r)| (u8::from(*r) as u32 + 1) << (16 - 4 * i))
            .fold((category as u32) << 20, |score, k| score | k)
    }
}

impl Ranker {
    pub fn classify(cards: &[Card]) -> (Category, Vec<Rank>) {
        let mut counts = [0u8; Rank::COUNT];
        let mut suits = [0u16; Suit::COUNT];
        for card in cards {
            counts[u8::from(card.rank()) as usize] += 1;
            suits[u8::from(card.suit()) as usize] |= u16::from(card.rank());
        }
        let ranks = suits.iter().fold(0u16, |acc, s| acc | s);
        let flush = suits.iter().copied().find(|s| s.count_ones() >= 5);
        None.or_else(|| {
            flush
                .and_then(Self::straight)
                .map(|hi| (Category::StraightFlush, vec![hi]))
        })
        .or_else(|| {
            Self::with_count(&counts, 4).first().map(|&quad| {
                let kick = Self::kickers(&counts, &[quad], 1);
                (Category::FourOAK, [vec![quad], kick].concat())
            })
        })
        .or_else(|| {
            Self::with_count(&counts, 3).first().and_then(|&trip| {
                Self::descending(&counts)
                    .into_iter()
                    .find(|&r| r != trip && counts[u8::from(r) as usize] >= 2)
                    .map(|pair| (Category::FullHouse, vec![trip, pair]))
            })
        })
        .or_else(|| {
            flush.map(|mask| {
                let top = Rank::all()
                    .into_iter()
                    .rev()
                    .filter(|r| mask & u16::from(*r) != 0)
                    .take(5)
                    .collect();
                (Category::Flush, top)
            })
        })
        .or_else(|| Self::straight(ranks).map(|hi| (Category::Straight, vec![hi])))
        .or_else(|| {
            Self::with_count(&counts, 3).first().map(|&trip| {
                let kick = Self::kickers(&counts, &[trip], 2);
                (Category::ThreeOAK, [vec![trip], kick].concat())
            })
        })
        .or_else(|| match Self::with_count(&counts, 2).as_slice() {
            [hi, lo, ..] => {
                let kick = Self::kickers(&counts, &[*hi, *lo], 1);
                Some((Category::TwoPair, [vec![*hi, *lo], kick].concat()))
            }
            [pair] => {
                let kick = Self::kickers(&counts, &[*pair], 3);
                Some((Category::OnePair, [vec![*pair], kick].concat()))
            }
            [] => None,
        })
        .unwrap_or_else(|| (Category::HighCard, Self::kickers(&counts, &[], 5)))
    }

    /// Highest rank topping five consecutive ranks in `mask`, wheel included.
    fn straight(mask: u16) -> Option<Rank> {
        const WHEEL: u16 = 0b1_0000_0000_1111;
        let mut bits = mask;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        match bits {
            0 if mask & WHEEL == WHEEL => Some(Rank::Five),
            0 => None,
            _ => Some(Rank::from((15 - bits.leading_zeros()) as u8)),
        }
    }

    fn descending(counts: &[u8; Rank::COUNT]) -> Vec<Rank> {
        Rank::all()
            .into_iter()
            .rev()
            .filter(|r| counts[u8::from(*r) as usize] > 0)
            .collect()
    }

    fn with_count(counts: &[u8; Rank::COUNT], n: u8) -> Vec<Rank> {
        Self::descending(counts)
            .into_iter()
            .filter(|r| counts[u8::from(*r) as usize] == n)
            .collect()
    }

    fn kickers(counts: &[u8; Rank::COUNT], used: &[Rank], n: usize) -> Vec<Rank> {
        Self::descending(counts)
            .into_iter()
            .filter(|r| !used.contains(r))
            .take(n)
            .collect()
    }
}
