//! Line-oriented serve loop
//!
//! One JSON request per input line, one JSON response per request on the
//! output, correlated by id. Conversions are dispatched asynchronously and
//! may complete out of order; a dedicated writer task owns the output so
//! response lines are never split or merged.
//!
//! Per line, independently: parse, validate, dispatch, respond. Every
//! failure mode is terminal for that line only; the loop keeps reading
//! until EOF and then drains in-flight conversions.

use std::sync::Arc;

use mathpipe_protocol::{schema, BridgeError, ConversionRequest, Generation, Response};
use serde_json::Value;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::engine::{Engine, EngineError};

/// Run the request loop until the reader reaches EOF.
///
/// There is no admission control or cancellation: the number of in-flight
/// conversions is bounded only by the engine, and a dispatched conversion
/// always runs to completion or failure.
pub async fn serve<R, W, E>(
    engine: Arc<E>,
    generation: Generation,
    mut reader: R,
    writer: W,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
    E: Engine + ?Sized + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let writer_task = spawn_writer(writer, rx);

    // Lines are read as raw bytes and decoded lossily: a line that is not
    // valid UTF-8 cannot be valid JSON either, so it degrades to a
    // parse-error response instead of ending the loop.
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer).await? == 0 {
            break;
        }
        if buffer.last() == Some(&b'\n') {
            buffer.pop();
            if buffer.last() == Some(&b'\r') {
                buffer.pop();
            }
        }
        let line = String::from_utf8_lossy(&buffer);
        handle_line(&engine, generation, &line, &tx);
    }

    // In-flight conversion tasks hold sender clones; the writer exits once
    // the last of them completes.
    drop(tx);
    writer_task
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
}

fn spawn_writer<W>(
    mut writer: W,
    mut rx: mpsc::UnboundedReceiver<Response>,
) -> JoinHandle<io::Result<()>>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(response) = rx.recv().await {
            let mut line = serde_json::to_vec(&response)?;
            line.push(b'\n');
            writer.write_all(&line).await?;
            writer.flush().await?;
        }
        Ok(())
    })
}

fn handle_line<E>(
    engine: &Arc<E>,
    generation: Generation,
    line: &str,
    tx: &mpsc::UnboundedSender<Response>,
)
where
    E: Engine + ?Sized + 'static,
{
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(error) => {
            let _ = tx.send(Response::failure(None, &BridgeError::Parse(error)));
            return;
        }
    };

    // The id is echoed whenever present and numeric, even if the request
    // fails validation for other reasons.
    let id = schema::extract_id(&value);

    let request = match generation.validate(value) {
        Ok(request) => request,
        Err(error) => {
            let _ = tx.send(Response::failure(id, &error));
            return;
        }
    };

    let engine = Arc::clone(engine);
    let tx = tx.clone();
    let id = request.id.clone();
    tokio::spawn(async move {
        // The conversion runs in its own task so that even a panicking
        // engine implementation still produces this line's response.
        let conversion = tokio::spawn(convert_response(engine, request));
        let response = match conversion.await {
            Ok(response) => response,
            Err(error) => {
                tracing::debug!("conversion task failed: {}", error);
                Response::failure(Some(id), &BridgeError::Unknown)
            }
        };
        let _ = tx.send(response);
    });
}

async fn convert_response<E>(engine: Arc<E>, request: ConversionRequest) -> Response
where
    E: Engine + ?Sized + 'static,
{
    let id = request.id.clone();
    match engine.convert(&request).await {
        Ok(rendered) => Response::svg(id, rendered),
        Err(EngineError::Conversion(message)) => {
            Response::failure(Some(id), &BridgeError::Conversion(message))
        }
        Err(EngineError::Internal(reason)) => {
            tracing::debug!("engine internal failure: {}", reason);
            Response::failure(Some(id), &BridgeError::Unknown)
        }
    }
}
