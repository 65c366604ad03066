use std::{future::Future, pin::Pin};
use waypath::{int64, method, path, rest, string, MatchResult, Method, Router};

type Response = Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send>>;

fn home() -> Response {
	Box::pin(async { Ok("welcome".to_owned()) })
}

fn user(name: String, id: i64) -> Response {
	Box::pin(async move { Ok(format!("user {} ({})", name, id)) })
}

fn delete_user(name: String, id: i64) -> Response {
	Box::pin(async move {
		if id == 0 {
			anyhow::bail!("user {} is protected", name);
		}
		Ok(format!("deleted {}", name))
	})
}

fn not_found(path: String) -> Response {
	Box::pin(async move { Ok(format!("nothing at /{}", path)) })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_max_level(tracing::Level::TRACE)
		.init();

	let profile = path!["user" / string() / int64()];
	println!("profile pattern: {}", profile);
	println!("profile link: {}", profile.generate(("foobar".to_owned(), 56121111)));

	let router = Router::new(vec![
		path![].to(home),
		method(Method::GET, profile.clone()).to(user),
		method(Method::DELETE, profile).to(delete_user),
		path![rest()].to(not_found),
	]);

	let requests = [
		(Method::GET, "/"),
		(Method::GET, "/user/JohnUser/1"),
		(Method::GET, "/user/JohnUser/1/"),
		(Method::DELETE, "/user/root/0"),
		(Method::POST, "/user/JohnUser/1"),
	];

	for (method, target) in requests.iter() {
		let response = match router.recognize(target, Some(method)) {
			MatchResult::FullMatch(response) => response,
			MatchResult::MatchWithTrailingSlash(_) => {
				println!("{} {} -> redirect to {}", method, target, target.trim_end_matches('/'));
				continue;
			}
			MatchResult::NoMatch => {
				println!("{} {} -> 404", method, target);
				continue;
			}
		};

		match response.await {
			Ok(body) => println!("{} {} -> {}", method, target, body),
			Err(e) => println!("{} {} -> 500: {}", method, target, e),
		}
	}

	Ok(())
}
