//! Standalone document assembly

/// Title of every exported document
pub const DOCUMENT_TITLE: &str = "Flow Report";

/// Wrap an HTML fragment in a self-contained document with embedded CSS
pub fn standalone_document(body: &str, stylesheet: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
<meta charset=\"UTF-8\">\n\
<title>{title}</title>\n\
<style>\n{css}\n</style>\n\
</head>\n\
<body>\n{body}</body>\n\
</html>\n",
        title = DOCUMENT_TITLE,
        // A literal "</style" would end the block early
        css = stylesheet.replace("</style", "<\\/style"),
        body = body,
    )
}
