use filtertable_filter::{Sign, parse};

pub fn run(query: &str) {
    let terms = parse(query);
    if terms.is_empty() {
        println!("(no terms)");
        return;
    }

    for (index, term) in terms.iter().enumerate() {
        let kind = match term.sign {
            Sign::Include => "include",
            Sign::Exclude => "exclude",
            Sign::Constrain => "constrain",
        };
        println!("{:>3}  {:<10} {}", index + 1, kind, term.fragment);
    }
}
