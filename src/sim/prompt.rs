//! Round prompts and matching tags

use std::fmt;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Prompt categories a player can enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Numbers,
    Letters,
    Colors,
    AddSub,
    Shapes,
}

/// Orb colours, in sprite-sheet order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbColor {
    Red,
    Teal,
    Lime,
    Purple,
}

impl OrbColor {
    pub const ALL: [OrbColor; 4] = [OrbColor::Red, OrbColor::Teal, OrbColor::Lime, OrbColor::Purple];

    pub fn name(&self) -> &'static str {
        match self {
            OrbColor::Red => "red",
            OrbColor::Teal => "teal",
            OrbColor::Lime => "lime",
            OrbColor::Purple => "purple",
        }
    }

    /// Column in the orb sprite sheet
    pub fn sprite_index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Triangle,
    Square,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Circle, Shape::Triangle, Shape::Square];

    pub fn symbol(&self) -> &'static str {
        match self {
            Shape::Circle => "●",
            Shape::Triangle => "▲",
            Shape::Square => "■",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
}

impl Op {
    pub fn symbol(&self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
        }
    }
}

/// What an orb shows; compared exactly against the prompt's tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Num(u8),
    Letter(char),
    Color(OrbColor),
    Shape(Shape),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Num(n) => write!(f, "num:{}", n),
            Tag::Letter(c) => write!(f, "let:{}", c),
            Tag::Color(c) => write!(f, "col:{}", c.name()),
            Tag::Shape(s) => write!(f, "shp:{}", s.symbol()),
        }
    }
}

impl Tag {
    /// Text drawn on the orb (colours are shown by sprite instead)
    pub fn label(&self) -> String {
        match self {
            Tag::Num(n) => n.to_string(),
            Tag::Letter(c) => c.to_string(),
            Tag::Color(_) => String::new(),
            Tag::Shape(s) => s.symbol().to_string(),
        }
    }

    pub fn sprite_index(&self) -> usize {
        match self {
            Tag::Color(c) => c.sprite_index(),
            _ => 0,
        }
    }
}

/// Highest number in the Numbers category
pub const MAX_NUMBER: u8 = 20;
/// Operands and results of AddSub stay within 0..=10
pub const MAX_ARITH: u8 = 10;

/// Typed payload of a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Number(u8),
    Letter(char),
    Color(OrbColor),
    Equation { a: u8, op: Op, b: u8, result: u8 },
    Shape(Shape),
}

/// The round's challenge
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub text: String,
}

fn random_letter(rng: &mut impl Rng) -> char {
    (b'A' + rng.random_range(0..26u8)) as char
}

fn random_color(rng: &mut impl Rng) -> OrbColor {
    *OrbColor::ALL.choose(rng).unwrap_or(&OrbColor::Red)
}

fn random_shape(rng: &mut impl Rng) -> Shape {
    *Shape::ALL.choose(rng).unwrap_or(&Shape::Circle)
}

impl Prompt {
    /// Build a prompt for one of `enabled` (Numbers if none are)
    pub fn generate(rng: &mut impl Rng, enabled: &[Category]) -> Self {
        let category = *enabled.choose(rng).unwrap_or(&Category::Numbers);
        Self::for_category(rng, category)
    }

    pub fn for_category(rng: &mut impl Rng, category: Category) -> Self {
        let kind = match category {
            Category::Numbers => PromptKind::Number(rng.random_range(0..=MAX_NUMBER)),
            Category::Letters => PromptKind::Letter(random_letter(rng)),
            Category::Colors => PromptKind::Color(random_color(rng)),
            Category::Shapes => PromptKind::Shape(random_shape(rng)),
            Category::AddSub => loop {
                let a = rng.random_range(0..=MAX_ARITH);
                let b = rng.random_range(0..=MAX_ARITH);
                let op = if rng.random_bool(0.5) { Op::Add } else { Op::Sub };
                let result = match op {
                    Op::Add => a as i16 + b as i16,
                    Op::Sub => a as i16 - b as i16,
                };
                if (0..=MAX_ARITH as i16).contains(&result) {
                    break PromptKind::Equation { a, op, b, result: result as u8 };
                }
            },
        };

        let text = match kind {
            PromptKind::Number(n) => format!("Find the number: {}", n),
            PromptKind::Letter(c) => format!("Find the letter: {}", c),
            PromptKind::Color(c) => format!("Find the color: {}", c.name()),
            PromptKind::Equation { a, op, b, .. } => format!("Solve: {} {} {}", a, op.symbol(), b),
            PromptKind::Shape(s) => format!("Find the shape: {}", s.symbol()),
        };

        Self { kind, text }
    }

    pub fn category(&self) -> Category {
        match self.kind {
            PromptKind::Number(_) => Category::Numbers,
            PromptKind::Letter(_) => Category::Letters,
            PromptKind::Color(_) => Category::Colors,
            PromptKind::Equation { .. } => Category::AddSub,
            PromptKind::Shape(_) => Category::Shapes,
        }
    }

    /// Canonical tag a correct orb carries
    pub fn tag(&self) -> Tag {
        match self.kind {
            PromptKind::Number(n) => Tag::Num(n),
            PromptKind::Letter(c) => Tag::Letter(c),
            PromptKind::Color(c) => Tag::Color(c),
            PromptKind::Equation { result, .. } => Tag::Num(result),
            PromptKind::Shape(s) => Tag::Shape(s),
        }
    }

    /// Tag for a distractor orb. Drawn from the full category domain, so it
    /// can equal the prompt's own tag.
    pub fn distractor(&self, rng: &mut impl Rng) -> Tag {
        match self.kind {
            PromptKind::Number(_) => Tag::Num(rng.random_range(0..=MAX_NUMBER)),
            PromptKind::Equation { .. } => Tag::Num(rng.random_range(0..=MAX_ARITH)),
            PromptKind::Letter(_) => Tag::Letter(random_letter(rng)),
            PromptKind::Color(_) => Tag::Color(random_color(rng)),
            PromptKind::Shape(_) => Tag::Shape(random_shape(rng)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_tag_strings() {
        assert_eq!(Tag::Num(7).to_string(), "num:7");
        assert_eq!(Tag::Letter('Q').to_string(), "let:Q");
        assert_eq!(Tag::Color(OrbColor::Teal).to_string(), "col:teal");
        assert_eq!(Tag::Shape(Shape::Triangle).to_string(), "shp:▲");
    }

    #[test]
    fn test_addsub_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(2024);
        for _ in 0..10_000 {
            let p = Prompt::for_category(&mut rng, Category::AddSub);
            let PromptKind::Equation { a, op, b, result } = p.kind else {
                panic!("expected an equation");
            };
            assert!(result <= MAX_ARITH);
            let expect = match op {
                Op::Add => a as i16 + b as i16,
                Op::Sub => a as i16 - b as i16,
            };
            assert_eq!(expect, result as i16);
            assert_eq!(p.tag(), Tag::Num(result));
        }
    }

    #[test]
    fn test_empty_modes_fall_back_to_numbers() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..50 {
            let p = Prompt::generate(&mut rng, &[]);
            assert_eq!(p.category(), Category::Numbers);
        }
    }

    #[test]
    fn test_prompt_text() {
        let mut rng = Pcg32::seed_from_u64(11);
        let p = Prompt::for_category(&mut rng, Category::Colors);
        let PromptKind::Color(c) = p.kind else { panic!("expected a colour") };
        assert_eq!(p.text, format!("Find the color: {}", c.name()));
    }

    #[test]
    fn test_distractors_can_repeat_the_answer() {
        let mut rng = Pcg32::seed_from_u64(9);
        let p = Prompt {
            kind: PromptKind::Shape(Shape::Square),
            text: String::new(),
        };
        let hits = (0..300).filter(|_| p.distractor(&mut rng) == p.tag()).count();
        assert!(hits > 0);
    }

    #[test]
    fn test_labels_and_sprites() {
        assert_eq!(Tag::Num(12).label(), "12");
        assert_eq!(Tag::Color(OrbColor::Lime).label(), "");
        assert_eq!(Tag::Color(OrbColor::Purple).sprite_index(), 3);
        assert_eq!(Tag::Shape(Shape::Circle).sprite_index(), 0);
    }

    proptest! {
        #[test]
        fn prop_only_enabled_categories(seed in any::<u64>(), mask in 1u8..32) {
            let all = [
                Category::Numbers,
                Category::Letters,
                Category::Colors,
                Category::AddSub,
                Category::Shapes,
            ];
            let enabled: Vec<_> = all
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, c)| *c)
                .collect();
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = Prompt::generate(&mut rng, &enabled);
            prop_assert!(enabled.contains(&p.category()));
        }

        #[test]
        fn prop_numbers_in_domain(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = Prompt::for_category(&mut rng, Category::Numbers);
            match p.tag() {
                Tag::Num(n) => prop_assert!(n <= MAX_NUMBER),
                other => prop_assert!(false, "unexpected tag {}", other),
            }
            match p.distractor(&mut rng) {
                Tag::Num(n) => prop_assert!(n <= MAX_NUMBER),
                other => prop_assert!(false, "unexpected tag {}", other),
            }
        }
    }
}
