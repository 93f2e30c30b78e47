use mockall::mock;
use rv32hls_core::soc::DataMemory;

mock! {
    pub Dmem {}
    impl DataMemory for Dmem {
        fn read_word(&mut self, word_addr: u32) -> u32;
        fn write_word(&mut self, word_addr: u32, data: u32, byte_enable: u8);
    }
}
