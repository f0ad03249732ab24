#[cfg(test)]
pub mod test {
    use crate::builder::{ParamSet, ParamSetBuilder};
    use crate::param::Param;
    use crate::setter::{self, Slot};

    /// Value slots for a small program called `myprog`.
    ///
    /// - `verbose` (alt `v`): flag
    /// - `count` (alt `c`): integer
    /// - `host`, `port`: members of group `net`
    /// - `src`, `dst`: positional, depending on the builder used
    pub struct Fixture {
        pub src: Slot<String>,
        pub dst: Slot<String>,
        pub verbose: Slot<bool>,
        pub count: Slot<i64>,
        pub host: Slot<String>,
        pub port: Slot<i64>,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self {
                src: Slot::default(),
                dst: Slot::default(),
                verbose: Slot::new(false),
                count: Slot::new(0),
                host: Slot::default(),
                port: Slot::new(0),
            }
        }

        /// Named parameters only.
        pub fn named_builder(&self) -> ParamSetBuilder {
            ParamSet::builder()
                .prog_name("myprog")
                .add(
                    Param::new("verbose", setter::Bool::new(&self.verbose), "say more")
                        .alt_name("v"),
                )
                .add(Param::new("count", setter::Int::new(&self.count), "how many").alt_name("c"))
                .add(Param::new("host", setter::Str::new(&self.host), "server host").group("net"))
                .add(Param::new("port", setter::Int::new(&self.port), "server port").group("net"))
        }

        /// Named parameters plus a single positional `src`.
        pub fn builder(&self) -> ParamSetBuilder {
            self.named_builder()
                .add_positional(Param::new("src", setter::Str::new(&self.src), "input file"))
        }

        /// Named parameters plus positional `src` and `dst`.
        pub fn two_positional_builder(&self) -> ParamSetBuilder {
            self.builder()
                .add_positional(Param::new("dst", setter::Str::new(&self.dst), "output file"))
        }

        /// Named parameters plus a terminal positional `src`.
        pub fn terminal_builder(&self) -> ParamSetBuilder {
            self.named_builder().add_positional(
                Param::new("src", setter::Str::new(&self.src), "command to run").terminal(),
            )
        }
    }

    #[test]
    fn fixture_builds() {
        let f = Fixture::new();
        let reg = f.two_positional_builder().build().unwrap();
        assert_eq!(reg.prog_base_name(), "myprog");
        assert_eq!(reg.positional().len(), 2);
        assert_eq!(reg.params().count(), 4);
    }
}
