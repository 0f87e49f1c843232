//! Chat text for command results, in Telegram's MarkdownV2.

use campus_core::{Command, QueryError, QueryReply};

/// Text to send back, and whether it must be parsed as MarkdownV2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub markdown: bool,
}

impl Reply {
    fn markdown(text: String) -> Self {
        Self { text, markdown: true }
    }

    fn plain(text: String) -> Self {
        Self { text, markdown: false }
    }
}

/// Escapes literal text for MarkdownV2. Valid inside and outside bold entities.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '=' | '|' | '{' | '}' | '.' | '!' | '\\'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `6.5` stays `6.5`, `5.0` stays `5.0`.
fn decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

pub fn query_reply(reply: &QueryReply) -> Reply {
    match reply {
        // Plain: the argument placeholders contain underscores.
        QueryReply::Greeting { app_name, commands } => {
            let mut text = format!("👋 Hello! I’m your {}.\n\nAvailable commands:\n", app_name);
            for help in commands {
                match help.argument {
                    Some(argument) => text.push_str(&format!("/{} <{}>\n", help.command, argument)),
                    None => text.push_str(&format!("/{}\n", help.command)),
                }
            }
            Reply::plain(text)
        }
        QueryReply::Fees { name, fees } => Reply::markdown(format!(
            "💰 *Fees Info for {}*:\nTotal: ₹{}\nPaid: ₹{}\nDue: ₹{}",
            escape_markdown(name),
            fees.total,
            fees.paid,
            fees.due
        )),
        QueryReply::Attendance {
            name,
            classes_held,
            attended,
            percentage,
        } => Reply::markdown(format!(
            "📊 *Attendance for {}*:\nClasses Held: {}\nAttended: {}\nPercentage: {}%",
            escape_markdown(name),
            classes_held,
            attended,
            escape_markdown(&decimal(*percentage))
        )),
        QueryReply::Hostel { name, hostel } => Reply::markdown(format!(
            "🏠 *Hostel Info for {}*:\nBlock: {}\nRoom: {}\nMess: {}",
            escape_markdown(name),
            escape_markdown(&hostel.block),
            escape_markdown(&hostel.room),
            escape_markdown(&hostel.mess)
        )),
        QueryReply::Library {
            name,
            books_issued,
            fine,
        } => {
            let books: Vec<String> = books_issued.iter().map(|b| escape_markdown(b)).collect();
            Reply::markdown(format!(
                "📚 *Library Info for {}*:\nBooks Issued:\n{}\nFine: ₹{}",
                escape_markdown(name),
                books.join("\n"),
                fine
            ))
        }
        QueryReply::Placements { name, placement } => Reply::markdown(format!(
            "💼 *Placement Info for {}*:\nCompany: {}\nRole: {}\nPackage: {} LPA",
            escape_markdown(name),
            escape_markdown(&placement.company),
            escape_markdown(&placement.role),
            escape_markdown(&decimal(placement.package))
        )),
        QueryReply::Certificates { name, certificates } => {
            let mut text = format!("📜 *Certificates for {}*:\n", escape_markdown(name));
            for cert in certificates {
                text.push_str(&format!(
                    "\\- {} \\({}\\)\n",
                    escape_markdown(&cert.cert_id),
                    escape_markdown(&cert.name)
                ));
            }
            Reply::markdown(text)
        }
        QueryReply::Verified { entry } => Reply::markdown(format!(
            "✅ Certificate *{}* is VALID\\.\nHash: `{}`\nTx: `{}`",
            escape_markdown(&entry.cert_id),
            entry.hash,
            entry.reference
        )),
    }
}

pub fn query_error(error: &QueryError) -> Reply {
    match error {
        QueryError::Usage { command, argument } => {
            Reply::plain(format!("Usage: /{} <{}>", command, argument))
        }
        QueryError::NotFound {
            command: Command::Verify,
            ..
        } => Reply::plain("❌ Certificate not found or invalid.".to_string()),
        QueryError::NotFound { .. } => Reply::plain("❌ Student not found.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::{Certificate, CommandHelp, Fees, LedgerEntry, Placement};

    #[test]
    fn fees_reply_matches_chat_wording() {
        let reply = query_reply(&QueryReply::Fees {
            name: "Aarav Sharma".to_string(),
            fees: Fees { total: 100000, paid: 75000, due: 25000 },
        });
        assert!(reply.markdown);
        assert_eq!(
            reply.text,
            "💰 *Fees Info for Aarav Sharma*:\nTotal: ₹100000\nPaid: ₹75000\nDue: ₹25000"
        );
    }

    #[test]
    fn package_and_percentage_keep_one_decimal() {
        let reply = query_reply(&QueryReply::Placements {
            name: "Meera Nair".to_string(),
            placement: Placement {
                company: "Wipro".to_string(),
                role: "Data Analyst Intern".to_string(),
                package: 5.0,
            },
        });
        assert!(reply.text.ends_with("Package: 5\\.0 LPA"), "{}", reply.text);

        let reply = query_reply(&QueryReply::Attendance {
            name: "Aarav Sharma".to_string(),
            classes_held: 120,
            attended: 110,
            percentage: 91.6,
        });
        assert!(reply.text.ends_with("Percentage: 91\\.6%"), "{}", reply.text);
    }

    #[test]
    fn library_books_are_newline_joined() {
        let reply = query_reply(&QueryReply::Library {
            name: "Aarav Sharma".to_string(),
            books_issued: vec!["DBMS".to_string(), "Operating Systems".to_string()],
            fine: 0,
        });
        assert!(reply.text.contains("Books Issued:\nDBMS\nOperating Systems\nFine: ₹0"));
    }

    #[test]
    fn certificates_list_id_and_name() {
        let reply = query_reply(&QueryReply::Certificates {
            name: "Meera Nair".to_string(),
            certificates: vec![Certificate {
                cert_id: "CERT-2024-003".to_string(),
                name: "AI ML Bootcamp".to_string(),
            }],
        });
        assert_eq!(
            reply.text,
            "📜 *Certificates for Meera Nair*:\n\\- CERT\\-2024\\-003 \\(AI ML Bootcamp\\)\n"
        );
    }

    #[test]
    fn verified_reply_shows_hash_and_reference() {
        let entry = LedgerEntry::for_certificate("CERT-2024-001");
        let reply = query_reply(&QueryReply::Verified { entry: entry.clone() });
        assert!(reply.text.starts_with("✅ Certificate *CERT\\-2024\\-001* is VALID\\."));
        assert!(reply.text.contains(&format!("Hash: `{}`", entry.hash)));
        assert!(reply.text.contains("Tx: `0x055a15c93892bf18`"));
    }

    #[test]
    fn greeting_is_plain_and_lists_commands() {
        let reply = query_reply(&QueryReply::Greeting {
            app_name: "College Student Info Bot".to_string(),
            commands: Command::QUERIES.iter().copied().map(CommandHelp::for_command).collect(),
        });
        assert!(!reply.markdown);
        assert!(reply.text.starts_with("👋 Hello! I’m your College Student Info Bot."));
        assert!(reply.text.contains("/fees <student_id>\n"));
        assert!(reply.text.contains("/verify <certificate_id>\n"));
    }

    #[test]
    fn errors_render_as_plain_hints() {
        let usage = query_error(&QueryError::Usage { command: Command::Hostel, argument: "student_id" });
        assert_eq!(usage, Reply::plain("Usage: /hostel <student_id>".to_string()));

        let missing = query_error(&QueryError::NotFound { command: Command::Hostel, key: "999".to_string() });
        assert_eq!(missing.text, "❌ Student not found.");

        let missing = query_error(&QueryError::NotFound { command: Command::Verify, key: "X".to_string() });
        assert_eq!(missing.text, "❌ Certificate not found or invalid.");
    }

    #[test]
    fn markdown_metacharacters_in_data_are_escaped() {
        assert_eq!(
            escape_markdown("snake_case *bold* `code` [link](x) v1.2!"),
            "snake\\_case \\*bold\\* \\`code\\` \\[link\\]\\(x\\) v1\\.2\\!"
        );
        assert_eq!(escape_markdown("C:\\tmp"), "C:\\\\tmp");
    }

    #[test]
    fn metacharacters_in_a_bold_name_stay_inside_the_entity() {
        let reply = query_reply(&QueryReply::Fees {
            name: "a_b*c".to_string(),
            fees: Fees { total: 10, paid: 10, due: 0 },
        });
        assert!(reply.markdown);
        assert!(reply.text.starts_with("💰 *Fees Info for a\\_b\\*c*:\n"), "{}", reply.text);
        // Every unescaped `*` is an entity delimiter: exactly one opening and one closing.
        let delimiters = reply
            .text
            .char_indices()
            .filter(|&(i, c)| c == '*' && !reply.text[..i].ends_with('\\'))
            .count();
        assert_eq!(delimiters, 2);
    }
}
