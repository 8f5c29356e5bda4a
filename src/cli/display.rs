use tabled::{Table, Tabled};

use crate::{
    cli::Reply,
    info, success,
    types::{AlbumTableRow, CategoryTableRow, Page, PlaylistTableRow},
    warning,
};

/// Prints a dispatcher reply to the console.
pub fn render(reply: &Reply, page_size: u32) {
    match reply {
        Reply::Albums(page) => print_page::<_, AlbumTableRow>(page, page_size),
        Reply::Playlists(page) => print_page::<_, PlaylistTableRow>(page, page_size),
        Reply::Categories(page) => print_page::<_, CategoryTableRow>(page, page_size),
        Reply::Authenticated => success!("You can browse the catalog now."),
        Reply::AuthFailed(_) => warning!("Authentication failed. Run `auth` to try again."),
        Reply::Unauthorized => warning!("Please, provide access for application (run `auth`)."),
        Reply::Unsupported(line) => warning!("Unsupported command: {}", line),
        Reply::Failed(e) => warning!("{}", e),
        Reply::Exit => info!("Goodbye!"),
    }
}

fn print_page<T, R>(page: &Page<T>, page_size: u32)
where
    R: Tabled + for<'a> From<&'a T>,
{
    if page.elements.is_empty() {
        info!("Nothing to show.");
        return;
    }

    let rows: Vec<R> = page.elements.iter().map(R::from).collect();
    println!("{}", Table::new(rows));
    println!(
        "---PAGE {} OF {}---",
        page.page_number,
        page.page_count(page_size).max(page.page_number)
    );
}
