pub fn handle_command(input: &str) -> Result<(), String> {
    match input.to_lowercase().as_str() {
        "help" => {
            println!("\n🔍 Search Commands:");
            println!("  search <food>         - Search the food database");
            println!("  <food>                - Same as search (Search tab only)");
            println!("  analyze <name|n>      - Health analysis of a food or of result number n");
            println!("  healthy [category]    - Show healthy picks, optionally for one category");
            println!("  categories            - List food categories");
            println!();

            println!("📷 Label Scan Commands:");
            println!("  image <path>          - Pick a nutrition label photo");
            println!("  scan                  - Read and analyze the picked label");
            println!();

            println!("🗂️ View Commands:");
            println!("  tab <search|scan>     - Switch tab (results are kept)");
            println!("  show                  - Redraw the current tab");
            println!();

            println!("⚙️ System Commands:");
            println!("  help  - Show this help menu");
            println!("  exit  - Exit the program");
            Ok(())
        }
        "exit" | "quit" => {
            println!("👋 Goodbye!");
            std::process::exit(0);
        }
        _ => Err("Unknown system command. Type 'help' for available commands.".to_string()),
    }
}
