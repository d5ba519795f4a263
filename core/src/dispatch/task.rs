use std::fmt;

/// The closed catalogue of chores the agent knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    GenerateData,
    FormatFile,
    CountWeekdayOccurrences,
    SortContacts,
    RecentLogHeadlines,
    BuildDocIndex,
    ExtractSenderEmail,
    ExtractCreditCardNumber,
    MostSimilarCommentPair,
    GoldTicketSales,
}

impl TaskKind {
    pub const ALL: [TaskKind; 10] = [
        TaskKind::GenerateData,
        TaskKind::FormatFile,
        TaskKind::CountWeekdayOccurrences,
        TaskKind::SortContacts,
        TaskKind::RecentLogHeadlines,
        TaskKind::BuildDocIndex,
        TaskKind::ExtractSenderEmail,
        TaskKind::ExtractCreditCardNumber,
        TaskKind::MostSimilarCommentPair,
        TaskKind::GoldTicketSales,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GenerateData => "generate_data",
            Self::FormatFile => "format_file",
            Self::CountWeekdayOccurrences => "count_weekday_occurrences",
            Self::SortContacts => "sort_contacts",
            Self::RecentLogHeadlines => "recent_log_headlines",
            Self::BuildDocIndex => "build_doc_index",
            Self::ExtractSenderEmail => "extract_sender_email",
            Self::ExtractCreditCardNumber => "extract_credit_card_number",
            Self::MostSimilarCommentPair => "most_similar_comment_pair",
            Self::GoldTicketSales => "gold_ticket_sales",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified instruction: the selected chore plus any argument pulled out
/// of the instruction text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    GenerateData { email: String },
    FormatFile,
    CountWeekdayOccurrences,
    SortContacts,
    RecentLogHeadlines,
    BuildDocIndex,
    ExtractSenderEmail,
    ExtractCreditCardNumber,
    MostSimilarCommentPair,
    GoldTicketSales,
}

impl Task {
    /// Build the task for `kind`, extracting arguments from the normalized
    /// instruction where the chore needs them.
    pub fn from_kind(kind: TaskKind, normalized: &str) -> Self {
        match kind {
            // The email is whatever trails the instruction.
            TaskKind::GenerateData => Self::GenerateData {
                email: normalized
                    .split_whitespace()
                    .last()
                    .unwrap_or_default()
                    .to_string(),
            },
            TaskKind::FormatFile => Self::FormatFile,
            TaskKind::CountWeekdayOccurrences => Self::CountWeekdayOccurrences,
            TaskKind::SortContacts => Self::SortContacts,
            TaskKind::RecentLogHeadlines => Self::RecentLogHeadlines,
            TaskKind::BuildDocIndex => Self::BuildDocIndex,
            TaskKind::ExtractSenderEmail => Self::ExtractSenderEmail,
            TaskKind::ExtractCreditCardNumber => Self::ExtractCreditCardNumber,
            TaskKind::MostSimilarCommentPair => Self::MostSimilarCommentPair,
            TaskKind::GoldTicketSales => Self::GoldTicketSales,
        }
    }

    pub fn kind(&self) -> TaskKind {
        match self {
            Self::GenerateData { .. } => TaskKind::GenerateData,
            Self::FormatFile => TaskKind::FormatFile,
            Self::CountWeekdayOccurrences => TaskKind::CountWeekdayOccurrences,
            Self::SortContacts => TaskKind::SortContacts,
            Self::RecentLogHeadlines => TaskKind::RecentLogHeadlines,
            Self::BuildDocIndex => TaskKind::BuildDocIndex,
            Self::ExtractSenderEmail => TaskKind::ExtractSenderEmail,
            Self::ExtractCreditCardNumber => TaskKind::ExtractCreditCardNumber,
            Self::MostSimilarCommentPair => TaskKind::MostSimilarCommentPair,
            Self::GoldTicketSales => TaskKind::GoldTicketSales,
        }
    }
}
