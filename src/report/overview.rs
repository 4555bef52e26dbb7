//! Static descriptive view

use console::style;

pub const ABSTRACT: &str = "Islamic Family & Social Services Association (IFSSA) is a culturally \
and spiritually sensitive social service provider whose services are open to all. IFSSA works on \
addressing the security, safety and growth needs of its clients through a range of programming \
that includes culturally appropriate food hampers, crisis support, domestic violence \
intervention, refugee support, preventative youth programming and more. IFSSA has been the \
leading voice against domestic violence in the Alberta Muslim community for over 25 years.";

pub const PROJECT_OVERVIEW: &str = "The project uses machine learning to predict the number of \
food hampers based on three factors: seasonality, special occasions and family size. The \
predictions help the organization plan inventory, staffing and resource allocation, \
particularly during peak periods.";

pub const PROBLEM_STATEMENT: &str = "The association has to manage inventory and staff around \
seasonality, special occasions and family size, especially during peak periods. Better \
demand estimates support planning of inventory, staffing and resource allocation for food \
hampers.";

pub const WHAT_IT_DOES: &str = "Predicts overall food hamper demand from seasonality, special \
occasions and family size, so the organization can plan inventory, staffing and resource \
allocation ahead of peak periods.";

/// Titled paragraphs of the descriptive view, in display order
pub fn sections() -> [(&'static str, &'static str); 4] {
    [
        ("💡 Abstract", ABSTRACT),
        ("Project Overview", PROJECT_OVERVIEW),
        ("Problem Statement", PROBLEM_STATEMENT),
        ("👨🏻‍💻 What our Project Does", WHAT_IT_DOES),
    ]
}

pub fn display_overview() {
    for (title, body) in sections() {
        println!();
        println!("    {}", style(title).cyan().bold());
        println!("    {}", style("─".repeat(50)).dim());
        for line in wrap(body, 72) {
            println!("    {}", line);
        }
    }
    println!();
}

/// Greedy word wrap
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
