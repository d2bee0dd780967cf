use std::collections::HashMap;
use std::convert::TryFrom;
use std::env;
use std::sync::Arc;

use futures::StreamExt;
use hyper::{Client, Uri};
use hyper::client::HttpConnector;
use hyper_socks2::SocksConnector;
use telegram_bot::*;
use telegram_bot::connector::Connector;
use telegram_bot::connector::hyper::{default_connector, HyperConnector};

use crate::boggle::Boggle;
use crate::dictionary::WordList;
use crate::game::{Action, Coord, Game};

mod boggle;
mod dictionary;
mod game;
mod word_chain;

fn parse_coord(s: &str) -> Option<Coord> {
    let mut iter = s.split_whitespace();
    let row = str::parse::<usize>(iter.next()?).ok()?;
    let column = str::parse::<usize>(iter.next()?).ok()?;
    Some((row, column))
}

fn parse_action(s: Option<&str>) -> Option<Action> {
    let s = s?;
    match s {
        "enter" => Some(Action::Enter),
        "stop" => Some(Action::Stop),
        _ => parse_coord(s).map(Action::Cell),
    }
}

struct GameManager<'a> {
    api: &'a Api,
    dictionary: Arc<WordList>,
    running_games: HashMap<(ChatId, MessageId), Box<dyn Game>>,
}

impl<'a> GameManager<'a> {
    fn new(api: &'a Api, dictionary: Arc<WordList>) -> GameManager<'a> {
        Self {
            api,
            dictionary,
            running_games: HashMap::new(),
        }
    }

    async fn handle_update(&mut self, update: Result<Update, Error>) -> Result<(), Error> {
        let update = update?;
        if let UpdateKind::Message(message) = update.kind {
            if let MessageKind::Text { ref data, .. } = message.kind {
                if data.starts_with("/boggle") {
                    let (game, text, inline_keyboard) =
                        Boggle::create(&message.from, self.dictionary.clone());
                    let reply = self.api.send(message
                        .text_reply(text)
                        .reply_markup(inline_keyboard)).await?;
                    if let MessageOrChannelPost::Message(reply) = reply {
                        self.running_games.insert((reply.chat.id(), reply.id), Box::new(game));
                    }
                }
            }
        } else if let UpdateKind::CallbackQuery(query) = update.kind {
            if let Some(MessageOrChannelPost::Message(ref message)) = query.message {
                let key = (message.chat.id(), message.id);
                let action = parse_action(query.data.as_ref().map(String::as_str));
                let result = match (action, self.running_games.get_mut(&key)) {
                    (Some(action), Some(game)) => game.interact(action, &query.from),
                    _ => None,
                };
                if let Some(result) = result {
                    if result.game_end {
                        self.running_games.remove(&key);
                    }
                    if let Some(ref answer) = result.answer {
                        self.api.send(query.answer(answer.to_owned())).await?;
                    } else {
                        self.api.send(query.acknowledge()).await?;
                    }
                    let _ = result.reply_to(self.api, message).await;
                } else {
                    self.api.send(query.acknowledge()).await?;
                }
            }
        }
        Ok(())
    }
}

fn socks5_connector(addr: String) -> Box<dyn Connector> {
    let mut connector = HttpConnector::new();
    connector.enforce_http(false);
    Box::new(
        HyperConnector::new(Client::builder().build(SocksConnector {
            proxy_addr: Uri::try_from(addr).unwrap(),
            auth: None,
            connector,
        }.with_tls().unwrap()))
    )
}

#[tokio::main]
async fn main() {
    let token = env::var("API_TOKEN").unwrap();
    let word_list = env::var("WORD_LIST").unwrap();
    let dictionary = Arc::new(WordList::from_file(&word_list).unwrap());
    let connector = env::var("PROXY")
        .map_or_else(|_| default_connector().unwrap(), socks5_connector);

    let api = Api::with_connector(token, connector);
    let mut stream = api.stream();

    let mut manager: GameManager = GameManager::new(&api, dictionary);

    while let Some(update) = stream.next().await {
        let _ = manager.handle_update(update).await;
    }
}
