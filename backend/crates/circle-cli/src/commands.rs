use clap::Subcommand;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Print every event of an SSE stream until it ends
    Watch {
        /// Server base URL (defaults to client.base_url from the config)
        #[arg(long)]
        url: Option<String>,

        /// Stream path (defaults to client.path from the config)
        #[arg(long)]
        path: Option<String>,
    },

    /// Count the frames a camera delivers, using the built-in test pattern
    Camera {
        /// Camera number, starting at 1
        #[arg(long, default_value_t = 1)]
        camera: usize,

        /// How long to watch the live view
        #[arg(long, default_value_t = 10)]
        seconds: u64,
    },
}
