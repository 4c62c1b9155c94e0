// ==========================================
// 工厂运营管理系统 - 样例文件生成器
// ==========================================
// 职责: 为每类数据生成规范表头 + 示例数据行的 CSV 文本
// 用途: 用户下载作为导入模板,仅文档性质
// ==========================================

use crate::domain::types::DataKind;

/// 规范样例 CSV（固定表头 + 2 行示例数据）
///
/// 回灌约束: 样例经对应种类的行校验必须零错误,
/// 记录数等于示例数据行数
pub fn sample_csv(kind: DataKind) -> &'static str {
    match kind {
        DataKind::Production => {
            "date,productType,quantity,target,wasteKg,orderId\n\
             2025-06-02,Cement Block,450,500,12.5,1001\n\
             2025-06-03,Paver Stone,480,500,8,1002\n"
        }
        DataKind::Inventory => {
            "itemName,stockKg,minStockKg,unit,lastUpdated\n\
             Cement,1200,500,kg,2025-06-02\n\
             Paint,150,100,L,2025-06-02\n"
        }
        DataKind::Sales => {
            "date,customer,productType,amount,revenue,delivered\n\
             2025-06-02,Acme Builders,Cement Block,200,15000,true\n\
             2025-06-03,Northside Depot,Paver Stone,120,8400,false\n"
        }
        DataKind::Workers => {
            "date,name,shift,tasksDone\n\
             2025-06-02,Li Wei,morning,14\n\
             2025-06-02,Maria Santos,afternoon,11\n"
        }
    }
}

/// 样例文件建议文件名
pub fn sample_file_name(kind: DataKind) -> String {
    format!("{}_sample.csv", kind.as_str())
}
