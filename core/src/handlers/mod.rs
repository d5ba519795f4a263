//! The chore handlers. Each one reads its injected input path(s), performs a
//! single transformation and replaces exactly one output.

pub mod card;
pub mod comments;
pub mod contacts;
pub mod dates;
pub mod docs;
pub mod email;
pub mod logs;
pub mod process;
pub mod tickets;

pub use card::{extract_credit_card_number, FAILED_TO_EXTRACT};
pub use comments::most_similar_comment_pair;
pub use contacts::sort_contacts;
pub use dates::count_weekday_occurrences;
pub use docs::build_doc_index;
pub use email::extract_sender_email;
pub use logs::{recent_log_headlines, RECENT_LOG_LIMIT};
pub use process::{format_file, generate_data};
pub use tickets::gold_ticket_sales;
