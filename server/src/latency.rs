//! Fixed artificial response latency.
//!
//! `LatencyLayer` wraps a service and holds each response back for a fixed
//! duration after the inner service has produced it. Status and body pass
//! through untouched; a zero delay skips the timer entirely.

use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use std::time::Duration;

use pin_project_lite::pin_project;
use tokio::time::Sleep;
use tower::{Layer, Service};

#[derive(Clone, Copy, Debug, Default)]
pub struct LatencyLayer {
    delay: Duration,
}

impl LatencyLayer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl<S> Layer<S> for LatencyLayer {
    type Service = Latency<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Latency {
            inner,
            delay: self.delay,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Latency<S> {
    inner: S,
    delay: Duration,
}

impl<S, Request> Service<Request> for Latency<S>
where
    S: Service<Request>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = LatencyFuture<S::Future, Result<S::Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        LatencyFuture {
            state: State::Responding {
                future: self.inner.call(request),
            },
            delay: self.delay,
        }
    }
}

pin_project! {
    #[project = StateProj]
    enum State<F, T> {
        Responding {
            #[pin]
            future: F,
        },
        Delaying {
            #[pin]
            sleep: Sleep,
            output: Option<T>,
        },
    }
}

pin_project! {
    /// Resolves to the inner output once the configured delay has elapsed.
    pub struct LatencyFuture<F, T> {
        #[pin]
        state: State<F, T>,
        delay: Duration,
    }
}

impl<F, T> Future for LatencyFuture<F, T>
where
    F: Future<Output = T>,
{
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        loop {
            match this.state.as_mut().project() {
                StateProj::Responding { future } => {
                    let output = ready!(future.poll(cx));
                    if this.delay.is_zero() {
                        return Poll::Ready(output);
                    }
                    this.state.set(State::Delaying {
                        sleep: tokio::time::sleep(*this.delay),
                        output: Some(output),
                    });
                }
                StateProj::Delaying { sleep, output } => {
                    ready!(sleep.poll(cx));
                    let output = output
                        .take()
                        .expect("LatencyFuture polled after completion");
                    return Poll::Ready(output);
                }
            }
        }
    }
}
