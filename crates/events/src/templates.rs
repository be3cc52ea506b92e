//! Email subjects and bodies. All copy is Vietnamese.

use crate::notifier::Notification;

/// Review request sent to each admin when a contribution arrives.
pub fn contribution_submitted(
    admin_email: &str,
    author_email: &str,
    field_label: &str,
    person_name: Option<&str>,
) -> Notification {
    let subject = format!("[Gia phả] Đóng góp mới: {field_label}");
    let mut body = format!(
        "Thành viên {author_email} vừa gửi một đóng góp mới.\n\nLoại: {field_label}\n"
    );
    if let Some(name) = person_name {
        body.push_str(&format!("Người liên quan: {name}\n"));
    }
    body.push_str("\nVui lòng vào trang quản trị để duyệt đóng góp này.");
    Notification::new(admin_email, subject, body)
}

/// Greeting sent to a living member on their birthday.
pub fn birthday_greeting(to: &str, display_name: &str, age: Option<i32>) -> Notification {
    let subject = format!("Chúc mừng sinh nhật {display_name}!");
    let age_line = match age {
        Some(age) if age > 0 => format!("Mừng {display_name} tròn {age} tuổi. "),
        _ => String::new(),
    };
    let body = format!(
        "Kính gửi {display_name},\n\n{age_line}Thay mặt dòng họ, chúc bạn một ngày sinh nhật \
         thật vui vẻ, mạnh khỏe và hạnh phúc.\n\nBan liên lạc dòng họ"
    );
    Notification::new(to, subject, body)
}

/// Reminder listing tomorrow's birthdays, sent to every active member.
pub fn birthday_reminder(to: &str, names: &[String]) -> Notification {
    let subject = format!("Nhắc lịch: {} người sinh nhật ngày mai", names.len());
    let list = names
        .iter()
        .map(|n| format!("  - {n}"))
        .collect::<Vec<_>>()
        .join("\n");
    let body = format!(
        "Ngày mai là sinh nhật của:\n\n{list}\n\nĐừng quên gửi lời chúc đến người thân nhé!"
    );
    Notification::new(to, subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contribution_email_mentions_author_and_person() {
        let n = contribution_submitted("admin@x", "a@x", "Thêm người", Some("Nguyễn Văn A"));
        assert_eq!(n.to, "admin@x");
        assert!(n.subject.contains("Thêm người"));
        assert!(n.body.contains("a@x"));
        assert!(n.body.contains("Nguyễn Văn A"));
    }

    #[test]
    fn greeting_omits_unknown_age() {
        let n = birthday_greeting("b@x", "Bình", None);
        assert!(!n.body.contains("tuổi"));
        let n = birthday_greeting("b@x", "Bình", Some(40));
        assert!(n.body.contains("40 tuổi"));
    }

    #[test]
    fn reminder_lists_every_name() {
        let n = birthday_reminder("c@x", &["An".to_string(), "Bình".to_string()]);
        assert!(n.subject.starts_with("Nhắc lịch: 2"));
        assert!(n.body.contains("  - An\n  - Bình"));
    }
}
