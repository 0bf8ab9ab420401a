use allyst::{
    endpoints::Hosts, server, Config, Credential, Environment, Friend,
    FriendQuery, ProxyClient, SortOrder, UserId,
};
use anyhow::Error;
use reqwest::Client;
use std::{
    collections::HashSet,
    io::{self, BufRead, Write},
    time::Duration,
};
use structopt::StructOpt;
use url::Url;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // a missing .env file is fine
    let _ = dotenvy::dotenv();
    env_logger::init();
    let args = Args::from_args();

    log::debug!("Starting application with {:#?}", args);

    match args {
        Args::Serve(serve) => server::serve(serve.config()).await?,
        Args::Whoami { proxy } => whoami(&proxy).await?,
        Args::Friends {
            proxy,
            search,
            sort,
        } => {
            let query = FriendQuery { search, sort };
            list_friends(&proxy, &query).await?;
        },
        Args::Unfriend {
            proxy,
            user_ids,
            matching,
            yes,
        } => unfriend(&proxy, user_ids, matching, yes).await?,
    }

    Ok(())
}

async fn whoami(args: &ProxyArgs) -> Result<(), Error> {
    let me = args.client()?.user_info().await?;

    let name = me.name.as_deref().unwrap_or(allyst::UNKNOWN_NAME);
    let display_name = me.display_name.as_deref().unwrap_or(name);

    println!("Logged in as {} (@{}, {})", display_name, name, me.id);

    Ok(())
}

async fn list_friends(args: &ProxyArgs, query: &FriendQuery) -> Result<(), Error> {
    let friends = args.client()?.friends().await?;
    let selected = query.apply(&friends);

    for friend in &selected {
        print_friend(friend);
    }
    println!("Showing {} of {} friends", selected.len(), friends.len());

    Ok(())
}

async fn unfriend(
    args: &ProxyArgs,
    mut user_ids: Vec<UserId>,
    matching: Option<String>,
    yes: bool,
) -> Result<(), Error> {
    let client = args.client()?;

    if let Some(search) = matching {
        if search.trim().is_empty() {
            anyhow::bail!("--matching needs something to search for");
        }

        let friends = client.friends().await?;
        let query = FriendQuery {
            search: Some(search),
            sort: SortOrder::Unsorted,
        };

        for friend in query.apply(&friends) {
            print_friend(friend);
            user_ids.push(friend.id);
        }
    }

    let mut seen = HashSet::new();
    user_ids.retain(|id| seen.insert(*id));

    if user_ids.is_empty() {
        println!("No friends selected");
        return Ok(());
    }

    if !yes && !confirm(user_ids.len())? {
        println!("Cancelled");
        return Ok(());
    }

    if let [user_id] = user_ids.as_slice() {
        let response = client.unfriend(*user_id).await?;
        println!("{}: {}", user_id, response.message);
        return Ok(());
    }

    let outcome = client.unfriend_all(&user_ids).await?;

    for result in &outcome.results {
        match &result.error {
            None => println!("{}: removed", result.user_id),
            Some(error) => println!("{}: failed ({})", result.user_id, error),
        }
    }
    println!("{}", outcome.summary());

    Ok(())
}

fn print_friend(friend: &Friend) {
    let status = if friend.is_online { "online" } else { "offline" };

    println!(
        "{:>12}  {} (@{}) [{}]",
        friend.id, friend.display_name, friend.name, status
    );
}

fn confirm(count: usize) -> Result<bool, io::Error> {
    print!("Remove {} friend(s)? This can't be undone [y/N] ", count);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "allyst",
    about = "Manage your Roblox friends list through a small proxy"
)]
enum Args {
    /// Run the proxy server.
    Serve(ServeArgs),
    /// Check your cookie by showing who it belongs to.
    Whoami {
        #[structopt(flatten)]
        proxy: ProxyArgs,
    },
    /// List your friends.
    Friends {
        #[structopt(flatten)]
        proxy: ProxyArgs,
        #[structopt(
            short = "s",
            long = "search",
            help = "Only show friends whose name contains this"
        )]
        search: Option<String>,
        #[structopt(
            long = "sort",
            default_value = "name",
            help = "Sort by name, display-name or none"
        )]
        sort: SortOrder,
    },
    /// Remove one or more friends.
    Unfriend {
        #[structopt(flatten)]
        proxy: ProxyArgs,
        #[structopt(help = "The IDs of the friends to remove")]
        user_ids: Vec<UserId>,
        #[structopt(
            short = "m",
            long = "matching",
            help = "Also remove every friend whose name contains this"
        )]
        matching: Option<String>,
        #[structopt(short = "y", long = "yes", help = "Don't ask for confirmation")]
        yes: bool,
    },
}

#[derive(Debug, StructOpt)]
struct ServeArgs {
    #[structopt(long = "host", env = "HOST", default_value = "0.0.0.0")]
    host: String,
    #[structopt(short = "p", long = "port", env = "PORT", default_value = "5000")]
    port: u16,
    #[structopt(
        long = "environment",
        env = "ALLYST_ENV",
        default_value = "development",
        help = "development or production"
    )]
    environment: Environment,
    #[structopt(
        long = "frontend-url",
        env = "FRONTEND_URL",
        help = "The origin allowed to make cross-origin requests in production"
    )]
    frontend_url: Option<String>,
    #[structopt(
        long = "unfriend-delay-ms",
        env = "ALLYST_UNFRIEND_DELAY_MS",
        default_value = "300",
        help = "The pause between unfriend requests in a batch"
    )]
    unfriend_delay_ms: u64,
    #[structopt(
        long = "upstream-timeout-secs",
        env = "ALLYST_UPSTREAM_TIMEOUT_SECS",
        default_value = "10"
    )]
    upstream_timeout_secs: u64,
    #[structopt(
        long = "users-host",
        env = "ALLYST_USERS_HOST",
        default_value = "https://users.roblox.com/"
    )]
    users_host: Url,
    #[structopt(
        long = "friends-host",
        env = "ALLYST_FRIENDS_HOST",
        default_value = "https://friends.roblox.com/"
    )]
    friends_host: Url,
    #[structopt(
        long = "thumbnails-host",
        env = "ALLYST_THUMBNAILS_HOST",
        default_value = "https://thumbnails.roblox.com/"
    )]
    thumbnails_host: Url,
    #[structopt(
        long = "auth-host",
        env = "ALLYST_AUTH_HOST",
        default_value = "https://auth.roblox.com/"
    )]
    auth_host: Url,
}

impl ServeArgs {
    fn config(self) -> Config {
        Config {
            host: self.host,
            port: self.port,
            environment: self.environment,
            frontend_url: self.frontend_url,
            hosts: Hosts {
                users: self.users_host,
                friends: self.friends_host,
                thumbnails: self.thumbnails_host,
                auth: self.auth_host,
            },
            unfriend_delay: Duration::from_millis(self.unfriend_delay_ms),
            upstream_timeout: Duration::from_secs(self.upstream_timeout_secs),
            ..Config::default()
        }
    }
}

#[derive(Debug, StructOpt)]
struct ProxyArgs {
    #[structopt(
        long = "proxy",
        env = "ALLYST_PROXY_URL",
        default_value = "http://localhost:5000/",
        help = "The Allyst proxy's base URL"
    )]
    proxy: Url,
    #[structopt(
        long = "cookie",
        env = "ROBLOX_COOKIE",
        hide_env_values = true,
        help = "Your .ROBLOSECURITY cookie"
    )]
    cookie: Credential,
}

impl ProxyArgs {
    fn client(&self) -> Result<ProxyClient, reqwest::Error> {
        let client = Client::builder()
            .user_agent(allyst::DEFAULT_USER_AGENT)
            .build()?;

        Ok(ProxyClient::new(
            client,
            self.proxy.clone(),
            self.cookie.clone(),
        ))
    }
}
