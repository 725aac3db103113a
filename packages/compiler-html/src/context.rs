use crate::compiler::CompileOptions;

/// Attribute list; `None` values are skipped, empty values render as bare attributes
pub(crate) type Attrs<'s> = [(&'s str, Option<String>)];

pub(crate) struct Context<'a> {
    pub options: &'a CompileOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    pub fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    pub fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    /// `<tag attrs>` on its own line, then indent
    pub fn open(&mut self, tag: &str, attrs: &Attrs) {
        let line = start_tag(tag, attrs);
        self.add_line(&line);
        self.indent();
    }

    /// Dedent, then `</tag>`
    pub fn close(&mut self, tag: &str) {
        self.dedent();
        self.add_line(&format!("</{}>", tag));
    }

    /// `<tag attrs>text</tag>` on one line; text is escaped
    pub fn element(&mut self, tag: &str, attrs: &Attrs, text: &str) {
        let line = format!("{}{}</{}>", start_tag(tag, attrs), escape_html(text), tag);
        self.add_line(&line);
    }

    /// Like [`element`](Self::element) but skipped when `text` is blank
    pub fn element_if(&mut self, tag: &str, attrs: &Attrs, text: &str) {
        if !text.trim().is_empty() {
            self.element(tag, attrs, text);
        }
    }

    /// Void element such as `<img>` or `<input>`
    pub fn void(&mut self, tag: &str, attrs: &Attrs) {
        debug_assert!(is_self_closing(tag));
        let line = start_tag(tag, attrs);
        self.add_line(&line);
    }

    pub fn get_output(self) -> String {
        self.buffer
    }
}

fn start_tag(tag: &str, attrs: &Attrs) -> String {
    let mut out = format!("<{}", tag);
    for (name, value) in attrs {
        match value {
            Some(value) if value.is_empty() => {
                out.push(' ');
                out.push_str(name);
            }
            Some(value) => {
                out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
            }
            None => {}
        }
    }
    out.push('>');
    out
}

/// Escape text for use in element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
