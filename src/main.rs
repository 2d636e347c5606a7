use hitter::error::AppResult;

fn main() -> AppResult<()> {
    hitter::run()
}
