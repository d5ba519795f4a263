use regex::Regex;

use super::task::TaskKind;

/// A single way of recognising a chore in normalized instruction text.
#[derive(Debug, Clone)]
pub enum Matcher {
    Contains(String),
    Pattern(Regex),
}

impl Matcher {
    pub fn contains(needle: &str) -> Self {
        Self::Contains(needle.to_lowercase())
    }

    pub fn pattern(re: &str) -> Result<Self, regex::Error> {
        Regex::new(re).map(Self::Pattern)
    }

    pub fn is_match(&self, normalized: &str) -> bool {
        match self {
            Self::Contains(needle) => normalized.contains(needle.as_str()),
            Self::Pattern(re) => re.is_match(normalized),
        }
    }
}

/// All matchers of one chore; any of them selects it.
#[derive(Debug, Clone)]
pub struct TaskRule {
    pub kind: TaskKind,
    pub matchers: Vec<Matcher>,
}

impl TaskRule {
    pub fn new(kind: TaskKind, matchers: Vec<Matcher>) -> Self {
        Self { kind, matchers }
    }

    pub fn is_match(&self, normalized: &str) -> bool {
        self.matchers.iter().any(|m| m.is_match(normalized))
    }
}

/// The built-in rule table, highest priority first.
pub fn standard_rules() -> Vec<TaskRule> {
    use Matcher as M;
    use TaskKind as K;

    let re = |s: &str| M::pattern(s).expect("built-in task pattern must compile");

    vec![
        TaskRule::new(K::GenerateData, vec![M::contains("generate data")]),
        TaskRule::new(K::FormatFile, vec![M::contains("format the contents")]),
        TaskRule::new(
            K::CountWeekdayOccurrences,
            vec![M::contains("count the number of wednesdays")],
        ),
        TaskRule::new(K::SortContacts, vec![M::contains("sort the array of contacts")]),
        TaskRule::new(
            K::RecentLogHeadlines,
            vec![M::contains("write the first line of the 10 most recent")],
        ),
        TaskRule::new(
            K::BuildDocIndex,
            vec![
                M::contains("find all markdown files"),
                M::contains("create index file"),
                re(r"find.*markdown.*h1"),
            ],
        ),
        TaskRule::new(
            K::ExtractSenderEmail,
            vec![
                M::contains("extract the sender's email address"),
                re(r"extract.*sender.*email"),
            ],
        ),
        TaskRule::new(
            K::ExtractCreditCardNumber,
            vec![M::contains("extract the card number")],
        ),
        TaskRule::new(
            K::MostSimilarCommentPair,
            vec![
                M::contains("find the most similar pair of comments"),
                re(r"most similar.*comments"),
            ],
        ),
        TaskRule::new(
            K::GoldTicketSales,
            vec![
                M::contains("total sales of all the items in the gold ticket type"),
                M::contains("total sales of gold tickets"),
            ],
        ),
    ]
}
