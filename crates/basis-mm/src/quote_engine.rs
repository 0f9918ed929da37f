//! Two-sided quote pricing over a five-level depth snapshot.
//!
//! The engine walks both sides of the book level by level, looking for the
//! tightest quote pair that keeps at least the configured minimum spread.
//! Each iteration either resolves a quote pair or advances exactly one depth
//! index, so the walk terminates within `2 * (BOOK_DEPTH - 1) + 1`
//! iterations.

use basis_core::{BookSnapshot, Price, BOOK_DEPTH};

/// Outcome of one pricing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteDecision {
    /// Book unusable: quote nothing and cancel what rests.
    Halted,
    /// Quote both sides at these prices.
    Quotes { bid: Price, ask: Price },
}

/// Price a two-sided quote from a book snapshot.
///
/// Inputs are in cents; `min_spread` and `tick_size` must be tick-aligned for
/// the outputs to stay on the grid.
pub fn compute_quote(book: &BookSnapshot, min_spread: u64, tick_size: u64) -> QuoteDecision {
    let last = BOOK_DEPTH - 1;
    let mut ask_depth = 0usize;
    let mut bid_depth = 0usize;

    loop {
        let ask_px = book.ask_prices[ask_depth].cents();
        let bid_px = book.bid_prices[bid_depth].cents();

        if ask_px == 0 && bid_px == 0 {
            return QuoteDecision::Halted;
        }
        if ask_px == 0 {
            // Ask side exhausted: anchor on the bid and open the full spread.
            return QuoteDecision::Quotes {
                bid: Price::new(bid_px),
                ask: Price::new(bid_px + min_spread),
            };
        }
        if bid_px == 0 {
            return QuoteDecision::Quotes {
                bid: Price::new(ask_px.saturating_sub(min_spread)),
                ask: Price::new(ask_px),
            };
        }

        let current_spread = ask_px.saturating_sub(bid_px);
        let ask_vol = book.ask_volumes[ask_depth];
        let bid_vol = book.bid_volumes[bid_depth];

        if current_spread > min_spread + 2 * tick_size {
            // Room to improve both sides inside the spread.
            return QuoteDecision::Quotes {
                bid: Price::new(bid_px + tick_size),
                ask: Price::new(ask_px - tick_size),
            };
        }
        if current_spread > min_spread + tick_size || current_spread == min_spread {
            // Only one side can improve; undercut in front of the larger
            // queue and join the smaller one.
            return if ask_vol > bid_vol {
                QuoteDecision::Quotes {
                    bid: Price::new(bid_px),
                    ask: Price::new(ask_px - tick_size),
                }
            } else {
                QuoteDecision::Quotes {
                    bid: Price::new(bid_px + tick_size),
                    ask: Price::new(ask_px),
                }
            };
        }

        // Too tight to quote at these levels: step past the larger queue.
        if ask_vol > bid_vol && bid_depth != last {
            bid_depth += 1;
        } else if ask_vol <= bid_vol && ask_depth != last {
            ask_depth += 1;
        } else if bid_depth == last && ask_depth != last {
            ask_depth += 1;
        } else if ask_depth == last && bid_depth != last {
            bid_depth += 1;
        } else {
            return QuoteDecision::Halted;
        }
    }
}
