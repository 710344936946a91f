pub fn run() {
    println!("Available commands:");
    println!();
    println!("  filter <QUERY> [FILE]      Filter a table and print the visible rows");
    println!("  parse <QUERY>              Show how a query is split into terms");
    println!("  compose <CURRENT> <LABEL>  Add a quick list phrase to a query");
    println!("  init-config                Write the default config file");
    println!("  show-config                Display current configuration");
    println!("  validate-config            Validate configuration file");
    println!("  help                       Show this help message");
    println!();
    println!("Query syntax:");
    println!();
    println!("  term     keep only visible rows that match");
    println!("  +term    show every row that matches (the first term defaults to this)");
    println!("  -term    hide visible rows that match");
    println!("  /re/i    match a regular expression with flags");
}
