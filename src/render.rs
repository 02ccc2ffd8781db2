/// Rewrite ASCII emoticons in assistant text to emoji before display.
/// Display-only: stored and logged messages keep the original text.
pub fn convert_emoticons(text: &str) -> String {
    const REPLACEMENTS: [(&str, &str); 25] = [
        (":)", "😊"),
        (":(", "😢"),
        (";-)", "😉"),
        (";)", "😉"),
        (":-D", "😄"),
        (":D", "😄"),
        (":-*", "😘"),
        (":*", "😘"),
        (":-O", "😮"),
        (":-o", "😮"),
        (":O", "😮"),
        (":o", "😮"),
        (":-P", "😛"),
        (":-p", "😛"),
        (":P", "😛"),
        (":p", "😛"),
        (":b", "😋"),
        (":B", "😋"),
        (":-/", "😕"),
        (":/", "😕"),
        ("<3", "❤️"),
        (":|", "😐"),
        ("XD", "😆"),
        ("B-)", "😎"),
        ("B)", "😎"),
    ];

    let mut out = text.to_string();
    for (pattern, emoji) in REPLACEMENTS {
        out = out.replace(pattern, emoji);
    }
    out
}
