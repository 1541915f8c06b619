use crate::core::reader::{DrawOutcome, TarotReader};
use crate::domain::ports::ReadingService;
use crate::ui::render;
use crate::utils::error::Result;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const NEXT_PROMPT: &str = "Press Enter for a new reading, or type q to quit.";

async fn write<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

async fn reveal<S, W>(reader: &TarotReader<S>, output: &mut W, reveal_delay: Duration) -> Result<()>
where
    S: ReadingService,
    W: AsyncWrite + Unpin,
{
    // 翻牌前稍作停頓，純粹是視覺效果
    tokio::time::sleep(reveal_delay).await;
    let session = reader.snapshot().await;
    write(output, &format!("\n{}\n", render::render_result(&session))).await
}

/// Interactive loop: question, draw, reveal, then Enter for another reading.
/// Ends on `q` or end of input.
pub async fn run_interactive<S, R, W>(
    reader: &TarotReader<S>,
    input: R,
    output: &mut W,
    reveal_delay: Duration,
) -> Result<()>
where
    S: ReadingService,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    write(output, &render::render_header()).await?;

    loop {
        let session = reader.snapshot().await;
        write(output, &format!("\n{}> ", render::render_idle(&session))).await?;

        let Some(question) = lines.next_line().await? else {
            break;
        };
        reader.set_question(question.trim()).await;

        write(output, &render::render_loading()).await?;
        match reader.draw().await {
            DrawOutcome::Revealed => {
                reveal(reader, output, reveal_delay).await?;
                write(output, &format!("{}\n> ", NEXT_PROMPT)).await?;

                let next = lines.next_line().await?;
                reader.reset().await;
                match next {
                    Some(answer) if !answer.trim().eq_ignore_ascii_case("q") => continue,
                    _ => break,
                }
            }
            // 失敗訊息會在下一輪的提問畫面顯示
            DrawOutcome::Failed(_) | DrawOutcome::Ignored | DrawOutcome::Stale => continue,
        }
    }

    write(output, "\n🌙 May your path be clear.\n").await
}

/// Single non-interactive reading, for `--question`.
pub async fn run_once<S, W>(
    reader: &TarotReader<S>,
    question: &str,
    output: &mut W,
    reveal_delay: Duration,
) -> Result<DrawOutcome>
where
    S: ReadingService,
    W: AsyncWrite + Unpin,
{
    reader.set_question(question.trim()).await;
    write(output, &render::render_loading()).await?;

    let outcome = reader.draw().await;
    match &outcome {
        DrawOutcome::Revealed => reveal(reader, output, reveal_delay).await?,
        DrawOutcome::Failed(message) => write(output, &format!("❌ {}\n", message)).await?,
        DrawOutcome::Ignored | DrawOutcome::Stale => {}
    }
    Ok(outcome)
}
