//! CRC-32 校验和
//!
//! EntertainTech 类控制器在程序头部携带记录块的 CRC-32。
//! 存在两个互不兼容的变体，后端声明用哪个：
//!
//! - [`Crc32::IsoHdlc`]：标准 CRC-32（反射、初值 `0xFFFFFFFF`、
//!   最终异或 `0xFFFFFFFF`），`"123456789"` 的校验值为
//!   `0xCBF43926`；
//! - [`Crc32::Jam`]：老一代娱乐工具链使用的 JAMCRC 变体，
//!   同样的计算但省去最终取反，`"123456789"` 的校验值为
//!   `0x340BC6D9`。
//!
//! 两者对同一输入互为按位取反，因此都由 `crc32fast` 导出。

/// CRC-32 算法变体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crc32 {
    /// 标准 CRC-32 / ISO-HDLC
    IsoHdlc,
    /// JAMCRC（无最终取反）
    Jam,
}

impl Crc32 {
    /// 计算字节串的校验和
    pub fn checksum(&self, data: &[u8]) -> u32 {
        match self {
            Crc32::IsoHdlc => crc32fast::hash(data),
            Crc32::Jam => !crc32fast::hash(data),
        }
    }

    /// 计算记录块的校验和
    ///
    /// 控制器校验的是剥掉全部空白字符后的记录文本，
    /// 这里先剥再算。
    pub fn records_checksum(&self, text: &str) -> u32 {
        let stripped: Vec<u8> = text
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        self.checksum(&stripped)
    }
}
