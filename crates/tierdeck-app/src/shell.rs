//! Interactive session driver.
//!
//! A line-oriented front end over the board engine: every command maps to
//! one session operation, the way the browser UI maps events to them.

use crate::platform;
use crate::platform::AssetResolver;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;
use tierdeck_core::session::ShareOutcome;
use tierdeck_core::{DropSpot, Orientation, RowId, Session, TierError, TileId};
use tierdeck_render::{compose, render_board, ExportOptions};

/// Interactive shell around one session.
pub struct Shell {
    session: Session,
    resolver: AssetResolver,
}

impl Shell {
    /// Wrap a session and its asset resolver.
    pub fn new(session: Session, resolver: AssetResolver) -> Self {
        Self { session, resolver }
    }

    /// The wrapped session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the command loop until end of input or `quit`.
    pub fn run(&mut self) -> io::Result<()> {
        println!("{}", self.session.preset().title);
        println!("type `help` for commands");

        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            self.fire_due_share(Instant::now());
            print!("> ");
            io::stdout().flush()?;

            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            if !self.execute(line.trim()) {
                break;
            }
        }
        Ok(())
    }

    /// Execute one command line. Returns `false` on `quit`.
    pub fn execute(&mut self, line: &str) -> bool {
        let now = Instant::now();
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");
        let rest: Vec<&str> = words.collect();

        match command {
            "" => {}
            "help" => print_help(),
            "show" => self.show(),
            "dump" => match self.session.board.to_json() {
                Ok(json) => println!("{json}"),
                Err(err) => println!("failed to serialize board: {err}"),
            },
            "select" => self.select(&rest, now),
            "clear" => self.session.clear_selection(),
            "compose" => self.compose(&rest, now),
            "move" => self.move_tile(&rest),
            "context" => self.context(&rest),
            "add" => self.add(&rest),
            "pick" => self.pick(),
            "paste" => self.paste(),
            "label" => self.label(&rest),
            "export" => self.export(&rest, now),
            "share" => self.share(now),
            "quit" | "exit" => return false,
            other => println!("unknown command `{other}`; try `help`"),
        }

        self.print_notices(Instant::now());
        true
    }

    fn show(&self) {
        for (row_id, row) in self.session.board.rows() {
            let tiles: Vec<String> = row
                .tiles
                .iter()
                .map(|tile| {
                    let mut text = format!("{} \"{}\"", tile.id(), tile.label);
                    if tile.selected {
                        text.push('*');
                    }
                    if tile.initial {
                        text.push('!');
                    }
                    text
                })
                .collect();
            println!("{:>6} [{}] {}", row.name, row_id, tiles.join("  "));
        }
        println!("selected: {}/2", self.session.selection_count());
    }

    fn select(&mut self, args: &[&str], now: Instant) {
        match args.first().and_then(|word| parse_tile(word)) {
            Some(id) => {
                self.session.toggle_selection(id, now);
            }
            None => println!("usage: select <tile>"),
        }
    }

    fn compose(&mut self, args: &[&str], now: Instant) {
        let orientation = match args.first().copied() {
            Some("h") | Some("horizontal") => Orientation::Horizontal,
            Some("v") | Some("vertical") => Orientation::Vertical,
            _ => {
                println!("usage: compose h|v");
                return;
            }
        };
        let Some(request) = self.session.begin_composition(orientation, now) else {
            return;
        };
        let result = compose(&request, &self.resolver).map_err(|err| err.into_decode_error());
        if let Some(id) = self.session.finish_composition(&request, result, now) {
            println!("composed {id} \"{}\"", self.session.board.tile(id).map(|t| t.label.as_str()).unwrap_or(""));
        }
    }

    fn move_tile(&mut self, args: &[&str]) {
        let (Some(tile), Some(row_name)) = (args.first().and_then(|w| parse_tile(w)), args.get(1))
        else {
            println!("usage: move <tile> <row> [before <tile>]");
            return;
        };
        let Some(target) = self.parse_row(row_name) else {
            println!("no such row `{row_name}`");
            return;
        };
        let spot = match (args.get(2).copied(), args.get(3)) {
            (Some("before"), Some(word)) => match parse_tile(word) {
                Some(reference) => DropSpot::OnTile(reference),
                None => {
                    println!("usage: move <tile> <row> [before <tile>]");
                    return;
                }
            },
            _ => DropSpot::Empty,
        };
        if !self.session.reorder(tile, spot, target) {
            println!("nothing moved");
        }
    }

    fn context(&mut self, args: &[&str]) {
        match args.first().and_then(|word| parse_tile(word)) {
            Some(id) => {
                let outcome = self.session.context_action(id);
                println!("{outcome:?}");
            }
            None => println!("usage: context <tile>"),
        }
    }

    fn add(&mut self, args: &[&str]) {
        if args.is_empty() {
            println!("usage: add <path>...");
            return;
        }
        for path in args {
            match platform::load_image_file(Path::new(path)) {
                Ok(source) => {
                    let id = self.session.add_image(source);
                    println!("added {id}");
                }
                Err(err) => println!("{err}"),
            }
        }
    }

    fn pick(&mut self) {
        for path in platform::pick_image_files() {
            match platform::load_image_file(&path) {
                Ok(source) => {
                    let id = self.session.add_image(source);
                    println!("added {id}");
                }
                Err(err) => println!("{err}"),
            }
        }
    }

    fn paste(&mut self) {
        match platform::paste_image_from_clipboard() {
            Some(source) => {
                let id = self.session.add_image(source);
                println!("added {id}");
            }
            None => println!("no image on the clipboard"),
        }
    }

    fn label(&mut self, args: &[&str]) {
        let Some(id) = args.first().and_then(|word| parse_tile(word)) else {
            println!("usage: label <tile> [text]");
            return;
        };
        match self.session.board.tile_mut(id) {
            Some(tile) => tile.label = args[1..].join(" "),
            None => println!("no such tile"),
        }
    }

    fn capture(&self) -> Result<tierdeck_render::ExportBitmap, TierError> {
        let options = ExportOptions::from_settings(self.session.settings());
        render_board(&self.session.board, &self.resolver, &options)
            .map_err(|err| err.into_capture_error())
    }

    fn export(&mut self, args: &[&str], now: Instant) {
        let capture = self.capture().map(|bitmap| bitmap.png);
        let Some(file) = self.session.export(capture, now) else {
            return;
        };
        match args.first() {
            Some(dir) => match platform::write_export(&file, Path::new(dir)) {
                Ok(path) => println!("saved {}", path.display()),
                Err(err) => println!("failed to save: {err}"),
            },
            None => {
                if let Some(path) = platform::save_export_dialog(&file) {
                    println!("saved {}", path.display());
                }
            }
        }
    }

    fn share(&mut self, now: Instant) {
        let capture = self.capture().map(|_| ());
        match self.session.share(capture, now) {
            Some(ShareOutcome::Opened(url)) => announce_share(&url),
            Some(ShareOutcome::Deferred { due }) => {
                // Best-effort degrade: wait out the grace delay, then share anyway.
                std::thread::sleep(due.saturating_duration_since(Instant::now()));
                self.fire_due_share(Instant::now());
            }
            None => {}
        }
    }

    fn fire_due_share(&mut self, now: Instant) {
        if let Some(url) = self.session.poll(now) {
            announce_share(&url);
        }
    }

    fn print_notices(&self, now: Instant) {
        for notice in self.session.notices().active(now) {
            println!("! {}", notice.message);
        }
    }

    fn parse_row(&self, name: &str) -> Option<RowId> {
        if name.eq_ignore_ascii_case("pool") {
            return Some(RowId::Pool);
        }
        self.session
            .board
            .tier_by_name(name)
            .or_else(|| self.session.board.tier_by_name(&name.to_uppercase()))
    }
}

fn announce_share(url: &url::Url) {
    println!("open in your browser to share: {url}");
}

fn parse_tile(word: &str) -> Option<TileId> {
    let digits = word.strip_prefix("item-").unwrap_or(word);
    digits.parse().ok().map(TileId)
}

fn print_help() {
    println!(
        "\
commands:
  show                       print the board
  dump                       print the board as JSON
  select <tile>              toggle a tile's selection (max 2)
  clear                      clear the selection
  compose h|v                merge the two selected tiles
  move <tile> <row> [before <tile>]
                             drag a tile into a row
  context <tile>             right-click action (remove / return to pool)
  add <path>...              add image files at the pool head
  pick                       add images via the file dialog
  paste                      add an image from the clipboard
  label <tile> [text]        set a tile's label
  export [dir]               save the board PNG (dialog without dir)
  share                      capture and open the share link
  quit"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tierdeck_core::Preset;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer
                .write_image_data(&vec![128u8; (width * height * 4) as usize])
                .unwrap();
        }
        bytes
    }

    fn shell_with_images(count: usize) -> Shell {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(Preset::default_preset());
        for i in 0..count {
            let path = dir.path().join(format!("{i}.png"));
            std::fs::write(&path, png_bytes(4, 4)).unwrap();
            let source = platform::load_image_file(&path).unwrap();
            session.add_image(source);
        }
        Shell::new(session, AssetResolver::new(dir.path()))
    }

    #[test]
    fn test_move_command_reaches_reorder_engine() {
        let mut shell = shell_with_images(2);
        assert!(shell.execute("move 0 S"));
        let s = shell.session().board.tier_by_name("S").unwrap();
        assert_eq!(shell.session().board.row(s).unwrap().len(), 1);

        assert!(shell.execute("move 1 s before 0"));
        let order: Vec<u64> = shell.session().board.row(s).unwrap().tiles.iter().map(|t| t.id().0).collect();
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_select_and_compose_end_to_end() {
        let mut shell = shell_with_images(2);
        shell.execute("select 0");
        shell.execute("select item-1");
        assert_eq!(shell.session().selection_count(), 2);

        shell.execute("compose h");
        assert_eq!(shell.session().selection_count(), 0);
        // Composed tile landed at the pool head.
        let pool = shell.session().board.row(RowId::Pool).unwrap();
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.tiles[0].id().0, 2);
    }

    #[test]
    fn test_compose_without_selection_posts_notice() {
        let mut shell = shell_with_images(1);
        shell.execute("compose v");
        assert_eq!(shell.session().notices().len(), 1);
    }

    #[test]
    fn test_export_writes_configured_filename() {
        let mut shell = shell_with_images(1);
        let out = tempfile::tempdir().unwrap();
        shell.execute(&format!("export {}", out.path().display()));

        let exported = out.path().join("tier-list.png");
        let bytes = std::fs::read(exported).unwrap();
        assert!(bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]));
    }

    #[test]
    fn test_quit_stops_the_loop() {
        let mut shell = shell_with_images(0);
        assert!(shell.execute("show"));
        assert!(!shell.execute("quit"));
    }
}
