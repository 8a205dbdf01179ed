//! Pure composition of the outbound message bodies.

use std::fmt::Write;

use courier_core::{MessageTemplate, NotificationRequest};

use crate::attachments::file_name;

/// HTML body plus the plain-text fallback sent alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    pub html: String,
    pub text: String,
}

/// Render the download-links block for the given attachment URLs.
///
/// Returns an empty string when no URL is non-blank.
pub fn attachment_links<S: AsRef<str>>(urls: &[S], heading: &str) -> String {
    let mut links = String::new();
    for url in urls.iter().map(|u| u.as_ref().trim()).filter(|u| !u.is_empty()) {
        let name = match file_name(url) {
            "" => url,
            name => name,
        };
        let _ = write!(
            links,
            "<br><a href='{url}' style='text-decoration: none; color: #007bff;'>{name}</a>"
        );
    }

    if links.is_empty() {
        return links;
    }
    format!(
        "<div style='border: 1px solid #ccc; padding: 10px; margin-top: 10px;'><h3>{heading}</h3>{links}</div>"
    )
}

/// Compose the branded HTML message and its plain-text fallback.
///
/// The fallback is the request body followed by the links block, markup
/// included.
pub fn compose<S: AsRef<str>>(
    request: &NotificationRequest,
    urls: &[S],
    reply_to: &str,
    template: &MessageTemplate,
) -> ComposedMessage {
    let links = attachment_links(urls, &template.links_heading);
    let merged = format!("{} {links}", request.body);

    let html = format!(
        "<html>
<body>
    <div class='frame'>
        <table>
            <tr><td><h1 style='color: black;'>{brand}</h1></td></tr>
            <tr><td class='content'><p class='large-text'>{request_type} {suffix}</p></td></tr>
            <tr><td class='content'><p class='merge-text'>{merged}</p>
            <p>{signature}<br><a href='mailto:{reply_to}'>{reply_to}</a><br>{phone}</p></td></tr>
            <tr><td class='footer'><p>{footer}</p></td></tr>
        </table>
    </div>
</body>
</html>
",
        brand = template.brand,
        request_type = request.request_type,
        suffix = template.completion_suffix,
        signature = template.signature,
        phone = template.phone,
        footer = template.footer,
    );

    ComposedMessage { html, text: merged }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> NotificationRequest {
        NotificationRequest {
            card_id: "42".into(),
            request_type: "Abertura de Conta".into(),
            body: "Segue o documento.".into(),
            subject: "Documento".into(),
            company_name: "Acme".into(),
            department: "FISCAL".into(),
            attachment_urls: vec!["https://h/a.pdf?token=1".into(), "https://h/b.docx".into()],
        }
    }

    #[test]
    fn links_use_trailing_segment() {
        let html = attachment_links(&["https://h/dir/a.pdf?token=1", "", "https://h/b.docx"], "Anexos");
        assert!(html.starts_with(
            "<div style='border: 1px solid #ccc; padding: 10px; margin-top: 10px;'><h3>Anexos</h3>"
        ));
        assert!(html.contains(
            "<br><a href='https://h/dir/a.pdf?token=1' style='text-decoration: none; color: #007bff;'>a.pdf</a>"
        ));
        assert!(html.contains(">b.docx</a>"));
        assert_eq!(html.matches("<a href").count(), 2);
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn no_urls_no_block() {
        assert_eq!(attachment_links::<&str>(&[], "Anexos"), "");
        assert_eq!(attachment_links(&["", "  "], "Anexos"), "");
    }

    #[test]
    fn bare_host_url_shows_whole_url() {
        let html = attachment_links(&["https://files.example.com"], "Anexos");
        assert!(html.contains(">https://files.example.com</a>"));
    }

    #[test]
    fn html_embeds_request_and_template() {
        let request = request();
        let template = MessageTemplate::default();
        let message = compose(
            &request,
            &request.attachment_urls,
            "fiscal@odoscontabilidade.com.br",
            &template,
        );

        assert!(message.html.contains("<h1 style='color: black;'>oDos</h1>"));
        assert!(message.html.contains("Abertura de Conta está concluída!"));
        assert!(message.html.contains("<p class='merge-text'>Segue o documento. <div"));
        assert!(message.html.contains(
            "<a href='mailto:fiscal@odoscontabilidade.com.br'>fiscal@odoscontabilidade.com.br</a>"
        ));
        assert!(message.html.contains("(98) 3022-7277"));
        assert!(message.html.contains("© 2024 ODOS Contabilidade."));
    }

    #[test]
    fn text_fallback_is_body_plus_links() {
        let request = request();
        let template = MessageTemplate::default();
        let message = compose(&request, &request.attachment_urls, "", &template);

        let links = attachment_links(&request.attachment_urls, &template.links_heading);
        assert_eq!(message.text, format!("Segue o documento. {links}"));
    }

    #[test]
    fn custom_template_strings() {
        let template = MessageTemplate {
            brand: "Acme".into(),
            completion_suffix: "is done".into(),
            ..MessageTemplate::default()
        };
        let message = compose(&request(), &[] as &[&str], "", &template);
        assert!(message.html.contains(">Acme</h1>"));
        assert!(message.html.contains("Abertura de Conta is done"));
        assert_eq!(message.text, "Segue o documento. ");
    }
}
