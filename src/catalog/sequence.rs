/// 请求代号；只有最新签发的代号对应的响应会被采纳
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// 单调递增的请求代号发放器
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: u64,
}

impl Sequencer {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_newest_ticket_is_latest() {
        let mut seq = Sequencer::default();
        let first = seq.issue();
        assert!(seq.is_latest(first));

        let second = seq.issue();
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
        assert!(second > first);
    }
}
