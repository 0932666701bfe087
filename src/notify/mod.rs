mod discord;

pub use discord::Discord;

use crate::grade::GradeRecord;

/// Delivers newly found grades somewhere the student will see them.
#[allow(async_fn_in_trait)]
pub trait Notify {
    /// Returns whether the notification went out. Failures are not retried.
    async fn notify(&self, grades: &[GradeRecord]) -> bool;
}

pub fn format_message(grades: &[GradeRecord]) -> String {
    if let [grade] = grades {
        return format!(
            "🎓 **You have a new grade!** 🎓\n\
             Subject: {}\n\
             Type: {}\n\
             Grade: **{}**\n\
             Date: {}",
            grade.subject(),
            grade.subject_type(),
            grade.grade(),
            grade.date(),
        );
    }

    let mut message = format!("🎓 **You have {} new grades!** 🎓\n\n", grades.len());
    for (i, grade) in grades.iter().enumerate() {
        message.push_str(&format!(
            "**{}. {} ({}):**\n   Grade: **{}**\n   Date: {}\n\n",
            i + 1,
            grade.subject(),
            grade.subject_type(),
            grade.grade(),
            grade.date(),
        ));
    }
    message
}

/// Splits `message` into pieces of at most `limit` characters, breaking
/// between lines where possible.
pub fn split_message(message: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in message.split_inclusive('\n') {
        let line_len = line.chars().count();
        if current_len + line_len > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if line_len > limit {
            let chars: Vec<char> = line.chars().collect();
            chunks.extend(chars.chunks(limit).map(|c| c.iter().collect::<String>()));
            continue;
        }
        current.push_str(line);
        current_len += line_len;
    }
    chunks.push(current);
    chunks.retain(|c| !c.trim().is_empty());
    chunks
}
