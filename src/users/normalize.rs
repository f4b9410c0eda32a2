use time::OffsetDateTime;

use crate::users::repo_types::User;

/// Escapes `&`, `'`, `<`, `>` and `"`; `/` and everything else pass through.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}

fn clean(s: &str) -> String {
    escape_html(s.trim())
}

impl User {
    /// Returns the input ready to be validated and stored: identity reset,
    /// free-text fields trimmed and escaped, both timestamps set to now.
    ///
    /// Address, region and country are kept as given.
    pub fn prepare(self) -> User {
        let now = OffsetDateTime::now_utc();
        User {
            id: 0,
            username: clean(&self.username),
            email: clean(&self.email),
            phone: clean(&self.phone),
            image_url: self
                .image_url
                .as_deref()
                .map(clean)
                .filter(|url| !url.is_empty()),
            specialisation: clean(&self.specialisation),
            created_at: now,
            updated_at: now,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn raw() -> User {
        User {
            id: 42,
            username: "  <b>vicki</b> ".into(),
            email: " vicki@example.com\n".into(),
            phone: "\t0700 000 000 ".into(),
            image_url: Some("  https://cdn.example.com/a.png?x=1&y=2 ".into()),
            specialisation: " Tom & Jerry's ".into(),
            latitude: 1.5,
            longitude: 2.5,
            address: "  Moi Avenue ".into(),
            region: "Nairobi".into(),
            country: "Kenya".into(),
            password: " secret123 ".into(),
            created_at: datetime!(2000-01-01 0:00 UTC),
            updated_at: datetime!(2000-01-01 0:00 UTC),
        }
    }

    #[test]
    fn escape_matches_html_escape_string() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&#34;x&#34;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("https://a.b/c"), "https://a.b/c");
    }

    #[test]
    fn prepare_resets_identity_and_stamps_timestamps() {
        let before = OffsetDateTime::now_utc();
        let user = raw().prepare();
        assert_eq!(user.id, 0);
        assert!(user.created_at >= before);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn prepare_trims_and_escapes_free_text() {
        let user = raw().prepare();
        assert_eq!(user.username, "&lt;b&gt;vicki&lt;/b&gt;");
        assert_eq!(user.email, "vicki@example.com");
        assert_eq!(user.phone, "0700 000 000");
        assert_eq!(
            user.image_url.as_deref(),
            Some("https://cdn.example.com/a.png?x=1&amp;y=2")
        );
        assert_eq!(user.specialisation, "Tom &amp; Jerry&#39;s");
    }

    #[test]
    fn prepare_leaves_password_and_location_untouched() {
        let user = raw().prepare();
        assert_eq!(user.password, " secret123 ");
        assert_eq!(user.address, "  Moi Avenue ");
        assert_eq!((user.latitude, user.longitude), (1.5, 2.5));
    }

    #[test]
    fn blank_image_url_becomes_none() {
        let mut input = raw();
        input.image_url = Some("   ".into());
        assert_eq!(input.prepare().image_url, None);
    }
}
